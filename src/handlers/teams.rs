use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::dtos::query_dtos::{FixturesResponse, RefreshQuery, TeamsQuery};
use crate::errors::{AppError, Result};
use crate::models::player::{Player, Squad};
use crate::models::stats::TeamSeasonStats;
use crate::models::team::Team;
use crate::state::AppState;

pub async fn get_teams(
    State(state): State<AppState>,
    Query(query): Query<TeamsQuery>,
) -> Result<Json<Vec<Team>>> {
    tracing::info!("🔍 GET /api/teams called with query: {:?}", query);
    let start_time = std::time::Instant::now();

    let teams = state
        .service
        .teams(query.kind, query.division.as_deref(), query.refresh)
        .await?;

    tracing::info!("✅ Returned {} teams in {:?}", teams.len(), start_time.elapsed());
    Ok(Json(teams))
}

pub async fn get_team_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<Team>> {
    tracing::info!("🔍 GET /api/teams/{} called", id);

    match state.service.team(&id, query.refresh).await? {
        Some(team) => Ok(Json(team)),
        None => {
            tracing::info!("❌ Team not found: {}", id);
            Err(AppError::DocumentNotFound)
        }
    }
}

pub async fn get_team_players(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<Vec<Player>>> {
    tracing::info!("🔍 GET /api/teams/{}/players called", id);

    if state.service.team(&id, false).await?.is_none() {
        return Err(AppError::DocumentNotFound);
    }
    let players = state.service.players(&id, query.refresh).await?;
    Ok(Json(players))
}

pub async fn get_team_squad(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Squad>> {
    tracing::info!("🔍 GET /api/teams/{}/squad called", id);

    let squad = state
        .service
        .squad(&id)
        .await?
        .ok_or(AppError::DocumentNotFound)?;
    Ok(Json(squad))
}

pub async fn get_team_fixtures(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<FixturesResponse>> {
    tracing::info!("🔍 GET /api/teams/{}/fixtures called", id);
    let start_time = std::time::Instant::now();

    if query.refresh {
        state.service.fixtures(&id, true).await?;
    }

    let classified = state
        .service
        .classified_fixtures(&id)
        .await?
        .ok_or(AppError::DocumentNotFound)?;

    if !classified.malformed_dates.is_empty() {
        tracing::warn!(
            "⚠️ {} fixtures of {} carry unreadable dates",
            classified.malformed_dates.len(),
            id
        );
    }

    tracing::info!(
        "✅ Classified {} fixtures for {} in {:?}",
        classified.len(),
        id,
        start_time.elapsed()
    );
    Ok(Json(FixturesResponse::new(id, classified)))
}

pub async fn get_team_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TeamSeasonStats>> {
    tracing::info!("🔍 GET /api/teams/{}/stats called", id);

    let stats = state
        .service
        .team_stats(&id)
        .await?
        .ok_or(AppError::DocumentNotFound)?;
    Ok(Json(stats))
}
