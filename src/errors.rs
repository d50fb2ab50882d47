// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::dtos::issues::Issue;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid query parameters.")]
    InvalidQuery(Vec<Issue>),

    #[error("Invalid payload.")]
    InvalidPayload(Vec<Issue>),

    #[error("{context}")]
    Persistence {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidQuery(issues) | AppError::InvalidPayload(issues) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string(), "details": issues }),
            ),
            AppError::Persistence { context, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": context, "details": source.to_string() }),
            ),
            AppError::Migration(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Database migration failed.", "details": e.to_string() }),
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Configuration error.", "details": msg }),
            ),
            AppError::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "IO error.", "details": e.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::persistence("Database error.", err)
    }
}

// Helper conversion functions
impl AppError {
    pub fn persistence(context: &'static str, source: sqlx::Error) -> Self {
        AppError::Persistence { context, source }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
