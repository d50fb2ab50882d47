use axum::{routing::get, Router};

use crate::handlers::matches;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(matches::list_matches).post(matches::create_match))
}
