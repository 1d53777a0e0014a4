#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use fa_stats::database::memory_store::InMemoryRecordStore;
use fa_stats::models::fixture::{Fixture, FixtureStatus};
use fa_stats::models::player::{Player, Position};
use fa_stats::models::ranking::StandingsRow;
use fa_stats::models::team::{Team, TeamType};
use fa_stats::services::date_normalizer::RawDate;
use fa_stats::services::request_cache::CachePolicy;
use fa_stats::services::team_stats_service::TeamStatsService;

pub fn team(id: &str, league_id: Option<&str>, color: Option<&str>) -> Team {
    Team {
        id: id.to_string(),
        name: format!("{} FC", id),
        division: "Premier".to_string(),
        kind: TeamType::Club,
        color_primary: color.map(str::to_string),
        league_id: league_id.map(str::to_string),
    }
}

pub fn player(id: &str, team_id: &str, position: Position, number: u32) -> Player {
    Player {
        id: id.to_string(),
        team_id: team_id.to_string(),
        name: format!("Player {}", id),
        position,
        number,
    }
}

pub fn completed(
    id: &str,
    home: &str,
    away: &str,
    score: (u32, u32),
    date: DateTime<Utc>,
) -> Fixture {
    Fixture {
        id: id.to_string(),
        home_team_id: home.to_string(),
        away_team_id: away.to_string(),
        date: RawDate::Instant(date),
        status: FixtureStatus::Completed,
        home_score: Some(score.0),
        away_score: Some(score.1),
        venue: None,
        competition: Some("League".to_string()),
    }
}

pub fn scheduled(id: &str, home: &str, away: &str, date: DateTime<Utc>) -> Fixture {
    Fixture {
        id: id.to_string(),
        home_team_id: home.to_string(),
        away_team_id: away.to_string(),
        date: RawDate::Instant(date),
        status: FixtureStatus::Scheduled,
        home_score: None,
        away_score: None,
        venue: Some("Home Park".to_string()),
        competition: Some("League".to_string()),
    }
}

pub fn standings(team_id: &str, league_id: &str, position: u32, goals_for: u32) -> StandingsRow {
    StandingsRow {
        team_id: team_id.to_string(),
        team_name: None,
        league_id: league_id.to_string(),
        position,
        played: 10,
        won: 5,
        drawn: 2,
        lost: 3,
        goals_for,
        goals_against: 10,
        points: 17,
    }
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

pub fn days_ahead(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

/// Two league teams with a short season between them and one upcoming match.
pub async fn seeded_store() -> Arc<InMemoryRecordStore> {
    let store = Arc::new(InMemoryRecordStore::new());

    store.insert_team(team("arsenal", Some("pl"), Some("#ef0107"))).await;
    store.insert_team(team("chelsea", Some("pl"), Some("#034694"))).await;
    store.insert_team(team("wrexham", None, None)).await;

    store.insert_player(player("p1", "arsenal", Position::Forward, 9)).await;
    store.insert_player(player("p2", "arsenal", Position::Goalkeeper, 1)).await;
    store.insert_player(player("p3", "arsenal", Position::Defender, 4)).await;

    store.insert_fixture(completed("f1", "arsenal", "chelsea", (2, 1), days_ago(30))).await;
    store.insert_fixture(completed("f2", "chelsea", "arsenal", (0, 0), days_ago(20))).await;
    store.insert_fixture(completed("f3", "arsenal", "wrexham", (1, 3), days_ago(10))).await;
    store.insert_fixture(scheduled("f4", "chelsea", "arsenal", days_ahead(3))).await;

    store.insert_standings(standings("arsenal", "pl", 2, 40)).await;
    store.insert_standings(standings("chelsea", "pl", 5, 31)).await;

    store
}

pub fn service(store: Arc<InMemoryRecordStore>) -> TeamStatsService {
    TeamStatsService::new(store, CachePolicy::default())
}
