use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

// A row of the `commentary` table. Belongs to exactly one match.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Commentary {
    pub id: i32,
    pub match_id: i32,
    pub minute: i32,
    /// Orders events within the same minute. Not unique.
    pub sequence: i32,
    pub period: String,
    pub event_type: String,
    pub actor: String,
    pub team: String,
    pub message: String,
    pub metadata: Option<Value>,
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

// For inserting commentary entries
#[derive(Debug, Clone, PartialEq)]
pub struct NewCommentary {
    pub match_id: i32,
    pub minute: i32,
    pub sequence: i32,
    pub period: String,
    pub event_type: String,
    pub actor: String,
    pub team: String,
    pub message: String,
    pub metadata: Option<Value>,
    pub tags: Option<Vec<String>>,
}
