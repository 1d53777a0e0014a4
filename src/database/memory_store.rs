use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;

use crate::database::record_store::RecordStore;
use crate::errors::{AppError, Result};
use crate::models::fixture::Fixture;
use crate::models::player::Player;
use crate::models::ranking::{LeagueStatsRow, StandingsRow};
use crate::models::stats::TeamSeasonStats;
use crate::models::team::{Team, TeamType};

#[derive(Default)]
struct Records {
    teams: Vec<Team>,
    players: Vec<Player>,
    fixtures: Vec<Fixture>,
    aggregated: Vec<(Option<String>, TeamSeasonStats)>,
    league_stats: Vec<LeagueStatsRow>,
    standings: Vec<StandingsRow>,
}

/// In-process record store for local runs and tests.
///
/// Counts calls per operation and can simulate an outage or a slow link.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Records>,
    calls: DashMap<&'static str, usize>,
    unavailable: AtomicBool,
    latency_ms: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_team(&self, team: Team) {
        self.records.write().await.teams.push(team);
    }

    pub async fn insert_player(&self, player: Player) {
        self.records.write().await.players.push(player);
    }

    pub async fn insert_fixture(&self, fixture: Fixture) {
        self.records.write().await.fixtures.push(fixture);
    }

    pub async fn insert_aggregated_stats(&self, league_id: Option<&str>, stats: TeamSeasonStats) {
        self.records
            .write()
            .await
            .aggregated
            .push((league_id.map(str::to_string), stats));
    }

    pub async fn insert_league_stats(&self, row: LeagueStatsRow) {
        self.records.write().await.league_stats.push(row);
    }

    pub async fn insert_standings(&self, row: StandingsRow) {
        self.records.write().await.standings.push(row);
    }

    /// Makes every following call fail with a source failure until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as usize, Ordering::SeqCst);
    }

    /// Number of times `operation` (e.g. `"fetch_team_fixtures"`) was called.
    pub fn calls(&self, operation: &str) -> usize {
        self.calls.get(operation).map(|c| *c).unwrap_or(0)
    }

    async fn enter(&self, operation: &'static str) -> Result<()> {
        *self.calls.entry(operation).or_insert(0) += 1;

        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency as u64)).await;
        }

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::source_unavailable(format!("{} failed: store offline", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch_teams(&self, kind: Option<TeamType>, division: Option<&str>) -> Result<Vec<Team>> {
        self.enter("fetch_teams").await?;
        let records = self.records.read().await;
        Ok(records
            .teams
            .iter()
            .filter(|t| kind.map_or(true, |k| t.kind == k))
            .filter(|t| division.map_or(true, |d| t.division == d))
            .cloned()
            .collect())
    }

    async fn fetch_team_by_id(&self, id: &str) -> Result<Option<Team>> {
        self.enter("fetch_team_by_id").await?;
        let records = self.records.read().await;
        Ok(records.teams.iter().find(|t| t.id == id).cloned())
    }

    async fn fetch_team_players(&self, team_id: &str) -> Result<Vec<Player>> {
        self.enter("fetch_team_players").await?;
        let records = self.records.read().await;
        Ok(records
            .players
            .iter()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn fetch_team_fixtures(&self, team_id: &str) -> Result<Vec<Fixture>> {
        self.enter("fetch_team_fixtures").await?;
        let records = self.records.read().await;
        Ok(records
            .fixtures
            .iter()
            .filter(|f| f.involves(team_id))
            .cloned()
            .collect())
    }

    async fn fetch_aggregated_stats(
        &self,
        team_id: &str,
        league_id: Option<&str>,
    ) -> Result<Option<TeamSeasonStats>> {
        self.enter("fetch_aggregated_stats").await?;
        let records = self.records.read().await;
        Ok(records
            .aggregated
            .iter()
            .find(|(league, stats)| {
                stats.team_id == team_id
                    && league_id.map_or(true, |wanted| league.as_deref() == Some(wanted))
            })
            .map(|(_, stats)| stats.clone()))
    }

    async fn fetch_league_stats(&self, league_id: &str) -> Result<Vec<LeagueStatsRow>> {
        self.enter("fetch_league_stats").await?;
        let records = self.records.read().await;
        Ok(records
            .league_stats
            .iter()
            .filter(|r| r.league_id == league_id)
            .cloned()
            .collect())
    }

    async fn fetch_standings_fallback(&self, league_id: &str) -> Result<Vec<StandingsRow>> {
        self.enter("fetch_standings_fallback").await?;
        let records = self.records.read().await;
        let mut rows: Vec<StandingsRow> = records
            .standings
            .iter()
            .filter(|r| r.league_id == league_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.position);
        Ok(rows)
    }

    async fn ping(&self) -> Result<()> {
        self.enter("ping").await
    }
}
