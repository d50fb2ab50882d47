use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Lifecycle state of a match, stored as the `match_status` Postgres enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Live => "live",
            MatchStatus::Finished => "finished",
        }
    }
}

// A row of the `matches` table
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i32,
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub status: MatchStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub home_score: i32,
    pub away_score: i32,
    pub created_at: DateTime<Utc>,
}

// For inserting matches; id and created_at are assigned by the database
#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub status: MatchStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub home_score: i32,
    pub away_score: i32,
}

/// Partial update of a match. `None` leaves the column untouched.
///
/// Status is written as given; it is never re-derived from the clock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchUpdate {
    pub status: Option<MatchStatus>,
    pub end_time: Option<DateTime<Utc>>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

impl MatchUpdate {
    pub fn status(status: MatchStatus) -> Self {
        MatchUpdate {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn score(home_score: i32, away_score: i32) -> Self {
        MatchUpdate {
            home_score: Some(home_score),
            away_score: Some(away_score),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: MatchStatus) -> Self {
        self.status = Some(status);
        self
    }
}
