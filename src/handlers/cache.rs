use axum::{extract::State, response::Json};

use crate::dtos::query_dtos::CacheClearResponse;
use crate::errors::Result;
use crate::state::AppState;

pub async fn clear_cache(State(state): State<AppState>) -> Result<Json<CacheClearResponse>> {
    tracing::info!("🧹 POST /api/cache/clear called");
    state.service.invalidate_all();

    Ok(Json(CacheClearResponse {
        success: true,
        message: "Cache cleared".to_string(),
    }))
}
