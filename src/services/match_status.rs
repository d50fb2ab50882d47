use chrono::{DateTime, Utc};

use crate::models::matches::MatchStatus;

/// Works out where a match sits in its lifecycle at `now`.
///
/// A match is `Scheduled` until its start time, `Finished` once an end time
/// is known and has passed, and `Live` in between (including an open-ended
/// match with no end time).
pub fn derive_status(
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> MatchStatus {
    if now < start_time {
        return MatchStatus::Scheduled;
    }

    match end_time {
        Some(end) if now >= end => MatchStatus::Finished,
        _ => MatchStatus::Live,
    }
}
