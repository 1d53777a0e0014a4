use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{cache, stats};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/compare", get(stats::compare_teams))
        .route("/rankings/:league_id", get(stats::get_rankings))
        .route("/cache/clear", post(cache::clear_cache))
}
