use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use validator::Validate;

use crate::dtos::query_dtos::{CompareQuery, RankingQuery};
use crate::errors::{AppError, Result};
use crate::models::comparison::ComparisonResult;
use crate::models::ranking::Statistic;
use crate::services::team_stats_service::Ranking;
use crate::state::AppState;

pub async fn compare_teams(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ComparisonResult>> {
    tracing::info!("🔍 GET /api/compare {} vs {}", query.team_a, query.team_b);
    query.validate()?;

    match state.service.compare(&query.team_a, &query.team_b).await? {
        Some(result) => Ok(Json(result)),
        None => {
            tracing::info!("❌ Comparison skipped, unknown team in {} / {}", query.team_a, query.team_b);
            Err(AppError::DocumentNotFound)
        }
    }
}

pub async fn get_rankings(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<Ranking>> {
    tracing::info!("🔍 GET /api/rankings/{} called with query: {:?}", league_id, query);
    query.validate()?;

    let statistic = match query.statistic.as_deref() {
        Some(raw) => raw.parse::<Statistic>()?,
        None => Statistic::GoalsFor,
    };

    let ranking = state.service.rank(&league_id, statistic, query.limit).await?;

    tracing::info!(
        "✅ Ranked {} teams of {} by {} ({:?})",
        ranking.entries.len(),
        league_id,
        statistic,
        ranking.source
    );
    Ok(Json(ranking))
}
