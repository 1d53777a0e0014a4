use async_trait::async_trait;

use crate::errors::Result;
use crate::models::fixture::Fixture;
use crate::models::player::Player;
use crate::models::ranking::{LeagueStatsRow, StandingsRow};
use crate::models::stats::TeamSeasonStats;
use crate::models::team::{Team, TeamType};

/// Read-only boundary to the document store.
///
/// Every method may fail independently with a source failure; absence of a
/// single entity is `Ok(None)`, never an error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_teams(&self, kind: Option<TeamType>, division: Option<&str>) -> Result<Vec<Team>>;

    async fn fetch_team_by_id(&self, id: &str) -> Result<Option<Team>>;

    async fn fetch_team_players(&self, team_id: &str) -> Result<Vec<Player>>;

    /// Fixtures where the team is home or away, any status.
    async fn fetch_team_fixtures(&self, team_id: &str) -> Result<Vec<Fixture>>;

    /// Precomputed season record, if one has been published.
    async fn fetch_aggregated_stats(
        &self,
        team_id: &str,
        league_id: Option<&str>,
    ) -> Result<Option<TeamSeasonStats>>;

    async fn fetch_league_stats(&self, league_id: &str) -> Result<Vec<LeagueStatsRow>>;

    async fn fetch_standings_fallback(&self, league_id: &str) -> Result<Vec<StandingsRow>>;

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
