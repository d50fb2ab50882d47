use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::dtos::issues::{issues_from, Issue};
use crate::models::matches::{Match, NewMatch};
use crate::services::match_status::derive_status;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 100;

/// Body of `POST /matches`.
///
/// Every field is optional at the serde level so that a missing field shows
/// up as a `required` issue on that field instead of a decoder error.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    #[validate(required, length(min = 1, message = "Sport is required"))]
    pub sport: Option<String>,

    #[validate(required, length(min = 1, message = "Home team is required"))]
    pub home_team: Option<String>,

    #[validate(required, length(min = 1, message = "Away team is required"))]
    pub away_team: Option<String>,

    #[validate(required, custom(function = "validate_timestamp"))]
    pub start_time: Option<String>,

    #[validate(custom(function = "validate_timestamp"))]
    pub end_time: Option<String>,

    #[validate(range(min = 0, message = "Home score must be a non-negative integer"))]
    pub home_score: Option<i32>,

    #[validate(range(min = 0, message = "Away score must be a non-negative integer"))]
    pub away_score: Option<i32>,
}

/// A create-match payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDraft {
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub home_score: i32,
    pub away_score: i32,
}

const TEXT_FIELDS: [&str; 5] = ["sport", "homeTeam", "awayTeam", "startTime", "endTime"];
const SCORE_FIELDS: [&str; 2] = ["homeScore", "awayScore"];

impl CreateMatchRequest {
    /// Decodes a JSON body, reporting each field of the wrong JSON type
    /// (or an out-of-range score) as an issue on that field.
    pub fn from_json(body: Value) -> Result<Self, Vec<Issue>> {
        let Some(object) = body.as_object() else {
            return Err(vec![Issue::body("invalid_type", "Expected a JSON object")]);
        };

        let mut issues = Vec::new();
        for field in TEXT_FIELDS {
            if let Some(value) = object.get(field) {
                if Option::<String>::deserialize(value).is_err() {
                    issues.push(Issue::new(field, "invalid_type", "Expected a string"));
                }
            }
        }
        for field in SCORE_FIELDS {
            if let Some(value) = object.get(field) {
                if Option::<i32>::deserialize(value).is_err() {
                    issues.push(Issue::new(field, "invalid_type", "Expected an integer"));
                }
            }
        }
        if !issues.is_empty() {
            return Err(issues);
        }

        serde_json::from_value(body).map_err(|e| vec![Issue::body("invalid_type", e.to_string())])
    }

    /// Checks the payload and collects every problem found, not just the first.
    pub fn into_draft(self) -> Result<MatchDraft, Vec<Issue>> {
        let mut issues = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => issues_from(&errors),
        };

        let start_time = self.start_time.as_deref().and_then(|raw| parse_timestamp(raw).ok());
        let end_time = self.end_time.as_deref().and_then(|raw| parse_timestamp(raw).ok());

        if let (Some(start), Some(end)) = (start_time, end_time) {
            if end <= start {
                issues.push(Issue::new(
                    "endTime",
                    "invalid_range",
                    "End time must be after start time",
                ));
                issues.sort_by(|a, b| a.path.cmp(&b.path));
            }
        }

        if !issues.is_empty() {
            return Err(issues);
        }

        // validate() passed, so the required fields are present and parse
        let (Some(sport), Some(home_team), Some(away_team), Some(start_time)) =
            (self.sport, self.home_team, self.away_team, start_time)
        else {
            return Err(vec![Issue::body("invalid_payload", "Missing required fields")]);
        };

        Ok(MatchDraft {
            sport,
            home_team,
            away_team,
            start_time,
            end_time,
            home_score: self.home_score.unwrap_or(0),
            away_score: self.away_score.unwrap_or(0),
        })
    }
}

impl MatchDraft {
    /// Fixes the match status against `now` and produces the row to insert.
    pub fn into_new_match(self, now: DateTime<Utc>) -> NewMatch {
        let status = derive_status(self.start_time, self.end_time, now);

        NewMatch {
            sport: self.sport,
            home_team: self.home_team,
            away_team: self.away_team,
            status,
            start_time: self.start_time,
            end_time: self.end_time,
            home_score: self.home_score,
            away_score: self.away_score,
        }
    }
}

/// Query string of `GET /matches`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListMatchesQuery {
    #[validate(custom(function = "validate_positive_integer"))]
    pub limit: Option<String>,
}

impl ListMatchesQuery {
    /// Number of rows to fetch: the requested limit, 50 by default, never above 100.
    pub fn page_size(&self) -> Result<i64, Vec<Issue>> {
        if let Err(errors) = self.validate() {
            return Err(issues_from(&errors));
        }

        let requested = match self.limit.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| vec![Issue::new("limit", "invalid_type", "Expected a positive integer")])?,
            None => DEFAULT_LIMIT,
        };

        Ok(requested.min(MAX_LIMIT))
    }
}

// Response envelopes
#[derive(Debug, Serialize)]
pub struct ListMatchesResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<Match>,
}

#[derive(Debug, Serialize)]
pub struct CreatedMatchResponse {
    pub data: Match,
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|dt| dt.with_timezone(&Utc))
}

fn validate_timestamp(value: &str) -> Result<(), ValidationError> {
    parse_timestamp(value).map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("invalid_date");
        error.message = Some("Invalid datetime, expected RFC 3339".into());
        error
    })
}

fn validate_positive_integer(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => {
            let mut error = ValidationError::new("too_small");
            error.message = Some("Limit must be a positive integer".into());
            Err(error)
        }
        Err(_) => {
            let mut error = ValidationError::new("invalid_type");
            error.message = Some("Expected a positive integer".into());
            Err(error)
        }
    }
}
