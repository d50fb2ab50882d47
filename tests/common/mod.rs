//! Shared helpers for driving the router without a database.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use sportz_api::database::repository::{CommentaryRepository, DbResult, MatchRepository};
use sportz_api::models::commentary::{Commentary, NewCommentary};
use sportz_api::models::matches::{Match, MatchUpdate, NewMatch};

/// Keeps matches in memory. Each insert gets a strictly later `created_at`.
#[derive(Default)]
pub struct InMemoryMatches {
    rows: Mutex<Vec<Match>>,
    requested_limits: Mutex<Vec<i64>>,
    next_id: Mutex<i32>,
}

impl InMemoryMatches {
    pub fn rows(&self) -> Vec<Match> {
        self.rows.lock().unwrap().clone()
    }

    pub fn requested_limits(&self) -> Vec<i64> {
        self.requested_limits.lock().unwrap().clone()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatches {
    async fn list_matches(&self, limit: i64) -> DbResult<Vec<Match>> {
        self.requested_limits.lock().unwrap().push(limit);

        let mut rows = self.rows();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn create_match(&self, new_match: NewMatch) -> DbResult<Match> {
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            *next_id
        };

        let record = Match {
            id,
            sport: new_match.sport,
            home_team: new_match.home_team,
            away_team: new_match.away_team,
            status: new_match.status,
            start_time: new_match.start_time,
            end_time: new_match.end_time,
            home_score: new_match.home_score,
            away_score: new_match.away_score,
            created_at: Utc::now() + Duration::milliseconds(id as i64),
        };
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_match(&self, id: i32) -> DbResult<Option<Match>> {
        Ok(self.rows().into_iter().find(|m| m.id == id))
    }

    async fn update_match(&self, id: i32, update: MatchUpdate) -> DbResult<Option<Match>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|m| m.id == id).map(|record| {
            apply_update(&update, record);
            record.clone()
        }))
    }

    async fn delete_match(&self, id: i32) -> DbResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn ping(&self) -> DbResult<()> {
        Ok(())
    }
}

// Mirrors the COALESCE update: unset fields keep their stored value.
fn apply_update(update: &MatchUpdate, record: &mut Match) {
    if let Some(status) = update.status {
        record.status = status;
    }
    if let Some(end_time) = update.end_time {
        record.end_time = Some(end_time);
    }
    if let Some(home_score) = update.home_score {
        record.home_score = home_score;
    }
    if let Some(away_score) = update.away_score {
        record.away_score = away_score;
    }
}

/// Keeps commentary in memory, listed by minute then sequence like the SQL query.
#[derive(Default)]
pub struct InMemoryCommentary {
    rows: Mutex<Vec<Commentary>>,
    next_id: Mutex<i32>,
}

#[async_trait]
impl CommentaryRepository for InMemoryCommentary {
    async fn create_commentary(&self, entry: NewCommentary) -> DbResult<Commentary> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        let record = Commentary {
            id: *next_id,
            match_id: entry.match_id,
            minute: entry.minute,
            sequence: entry.sequence,
            period: entry.period,
            event_type: entry.event_type,
            actor: entry.actor,
            team: entry.team,
            message: entry.message,
            metadata: entry.metadata,
            tags: entry.tags,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_commentary(&self, match_id: i32) -> DbResult<Vec<Commentary>> {
        let mut rows: Vec<Commentary> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.match_id == match_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| (c.minute, c.sequence, c.id));
        Ok(rows)
    }

    async fn delete_commentary(&self, id: i32) -> DbResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok((before - rows.len()) as u64)
    }
}

/// Fails every call the way a dropped database would.
pub struct UnavailableMatches;

#[async_trait]
impl MatchRepository for UnavailableMatches {
    async fn list_matches(&self, _limit: i64) -> DbResult<Vec<Match>> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn create_match(&self, _new_match: NewMatch) -> DbResult<Match> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn find_match(&self, _id: i32) -> DbResult<Option<Match>> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn update_match(&self, _id: i32, _update: MatchUpdate) -> DbResult<Option<Match>> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn delete_match(&self, _id: i32) -> DbResult<u64> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn ping(&self) -> DbResult<()> {
        Err(sqlx::Error::PoolClosed)
    }
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
