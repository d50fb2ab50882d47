use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde_json::Value;

use crate::dtos::issues::Issue;
use crate::dtos::match_dtos::{
    CreateMatchRequest, CreatedMatchResponse, ListMatchesQuery, ListMatchesResponse,
};
use crate::errors::{AppError, Result};
use crate::state::AppState;

pub async fn list_matches(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListMatchesQuery>, QueryRejection>,
) -> Result<Json<ListMatchesResponse>> {
    let start_time = std::time::Instant::now();

    let Query(query) = query.map_err(|rejection| {
        tracing::warn!("❌ Unreadable query string: {}", rejection.body_text());
        AppError::InvalidQuery(vec![Issue::body("invalid_query", rejection.body_text())])
    })?;
    tracing::debug!("🔍 GET /matches called with query: {:?}", query);

    let limit = query.page_size().map_err(|issues| {
        tracing::warn!("❌ Invalid list query: {:?}", issues);
        AppError::InvalidQuery(issues)
    })?;

    let matches = state.matches.list_matches(limit).await.map_err(|e| {
        tracing::error!("❌ Failed to list matches: {}", e);
        AppError::persistence("Failed to retrieve matches.", e)
    })?;

    tracing::info!(
        "✅ Fetched {} matches (limit {}) in {:?}",
        matches.len(),
        limit,
        start_time.elapsed()
    );

    Ok(Json(ListMatchesResponse {
        success: true,
        message: "Matches retrieved successfully".to_string(),
        data: matches,
    }))
}

pub async fn create_match(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedMatchResponse>)> {
    let start_time = std::time::Instant::now();

    // Only malformed JSON is rejected here; field types are checked per field below.
    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!("❌ Unreadable match payload: {}", rejection.body_text());
        AppError::InvalidPayload(vec![Issue::body("invalid_json", rejection.body_text())])
    })?;

    let draft = CreateMatchRequest::from_json(body)
        .and_then(CreateMatchRequest::into_draft)
        .map_err(|issues| {
            tracing::warn!("❌ Match payload failed validation: {:?}", issues);
            AppError::InvalidPayload(issues)
        })?;

    let new_match = draft.into_new_match(Utc::now());
    tracing::debug!(
        "   → {} vs {} derived as {}",
        new_match.home_team,
        new_match.away_team,
        new_match.status.as_str()
    );

    let created = state.matches.create_match(new_match).await.map_err(|e| {
        tracing::error!("❌ Failed to create match: {}", e);
        AppError::persistence("Failed to create match.", e)
    })?;

    tracing::info!(
        "✅ Created match {}: {} vs {} ({}) in {:?}",
        created.id,
        created.home_team,
        created.away_team,
        created.status.as_str(),
        start_time.elapsed()
    );

    Ok((StatusCode::CREATED, Json(CreatedMatchResponse { data: created })))
}
