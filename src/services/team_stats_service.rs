// src/services/team_stats_service.rs
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::database::record_store::RecordStore;
use crate::errors::Result;
use crate::models::comparison::ComparisonResult;
use crate::models::fixture::Fixture;
use crate::models::player::{Player, Squad};
use crate::models::ranking::{LeagueStatsRow, RankingEntry, Statistic, StandingsRow};
use crate::models::stats::TeamSeasonStats;
use crate::models::team::{Team, TeamType};
use crate::services::cache_key::CacheKey;
use crate::services::comparison_engine::{self, ComparisonSide};
use crate::services::fixture_classifier::{self, ClassifiedFixtures};
use crate::services::ranking_engine::{self, RankingSource};
use crate::services::request_cache::{CachePolicy, RequestCache};
use crate::services::stats_aggregator;

pub const DEFAULT_RANKING_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub league_id: String,
    pub statistic: Statistic,
    pub source: RankingSource,
    pub entries: Vec<RankingEntry>,
}

/// Entry point for every team, fixture and statistics read.
///
/// Store reads go through one [`RequestCache`] per record kind, keyed by
/// [`CacheKey`]; the engines only ever see snapshots.
pub struct TeamStatsService {
    store: Arc<dyn RecordStore>,
    teams: RequestCache<CacheKey, Vec<Team>>,
    team: RequestCache<CacheKey, Option<Team>>,
    players: RequestCache<CacheKey, Vec<Player>>,
    fixtures: RequestCache<CacheKey, Vec<Fixture>>,
    aggregated: RequestCache<CacheKey, Option<TeamSeasonStats>>,
    league_stats: RequestCache<CacheKey, Vec<LeagueStatsRow>>,
    standings: RequestCache<CacheKey, Vec<StandingsRow>>,
    ranking_default_limit: usize,
}

impl TeamStatsService {
    pub fn new(store: Arc<dyn RecordStore>, policy: CachePolicy) -> Self {
        Self {
            store,
            teams: RequestCache::new("teams", policy),
            team: RequestCache::new("team", policy),
            players: RequestCache::new("players", policy),
            fixtures: RequestCache::new("fixtures", policy),
            aggregated: RequestCache::new("aggregated_stats", policy),
            league_stats: RequestCache::new("league_stats", policy),
            standings: RequestCache::new("standings", policy),
            ranking_default_limit: DEFAULT_RANKING_LIMIT,
        }
    }

    pub fn with_ranking_limit(mut self, limit: usize) -> Self {
        self.ranking_default_limit = limit;
        self
    }

    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }

    pub async fn teams(
        &self,
        kind: Option<TeamType>,
        division: Option<&str>,
        refresh: bool,
    ) -> Result<Vec<Team>> {
        let store = Arc::clone(&self.store);
        let division_owned = division.map(str::to_string);
        self.teams
            .get_or_fetch_with(CacheKey::teams(kind, division), refresh, move || async move {
                store.fetch_teams(kind, division_owned.as_deref()).await
            })
            .await
    }

    pub async fn team(&self, id: &str, refresh: bool) -> Result<Option<Team>> {
        let store = Arc::clone(&self.store);
        let id_owned = id.to_string();
        self.team
            .get_or_fetch_with(CacheKey::TeamById(id.to_string()), refresh, move || async move {
                store.fetch_team_by_id(&id_owned).await
            })
            .await
    }

    pub async fn players(&self, team_id: &str, refresh: bool) -> Result<Vec<Player>> {
        let store = Arc::clone(&self.store);
        let team_id_owned = team_id.to_string();
        self.players
            .get_or_fetch_with(CacheKey::TeamPlayers(team_id.to_string()), refresh, move || async move {
                store.fetch_team_players(&team_id_owned).await
            })
            .await
    }

    /// Players grouped by position, or `None` for an unknown team.
    pub async fn squad(&self, team_id: &str) -> Result<Option<Squad>> {
        if self.team(team_id, false).await?.is_none() {
            return Ok(None);
        }
        let players = self.players(team_id, false).await?;
        Ok(Some(Squad::from_players(&players)))
    }

    pub async fn fixtures(&self, team_id: &str, refresh: bool) -> Result<Vec<Fixture>> {
        let store = Arc::clone(&self.store);
        let team_id_owned = team_id.to_string();
        self.fixtures
            .get_or_fetch_with(CacheKey::TeamFixtures(team_id.to_string()), refresh, move || async move {
                store.fetch_team_fixtures(&team_id_owned).await
            })
            .await
    }

    pub async fn classified_fixtures(&self, team_id: &str) -> Result<Option<ClassifiedFixtures>> {
        if self.team(team_id, false).await?.is_none() {
            return Ok(None);
        }
        let fixtures = self.fixtures(team_id, false).await?;
        Ok(Some(fixture_classifier::classify(team_id, &fixtures, Utc::now())))
    }

    /// Season record for a team: the published aggregate when there is one,
    /// otherwise derived from its fixtures. `None` for an unknown team.
    pub async fn team_stats(&self, team_id: &str) -> Result<Option<TeamSeasonStats>> {
        let Some(team) = self.team(team_id, false).await? else {
            return Ok(None);
        };
        self.stats_for(&team).await.map(Some)
    }

    async fn stats_for(&self, team: &Team) -> Result<TeamSeasonStats> {
        if let Some(published) = self.aggregated_stats(&team.id, team.league_id.as_deref()).await? {
            return Ok(published.with_derived_fields());
        }

        tracing::debug!("No published stats for {}, aggregating fixtures", team.id);
        let fixtures = self.fixtures(&team.id, false).await?;
        Ok(stats_aggregator::aggregate(&team.id, &fixtures, Utc::now()))
    }

    async fn aggregated_stats(
        &self,
        team_id: &str,
        league_id: Option<&str>,
    ) -> Result<Option<TeamSeasonStats>> {
        let store = Arc::clone(&self.store);
        let team_id_owned = team_id.to_string();
        let league_id_owned = league_id.map(str::to_string);
        self.aggregated
            .get_or_fetch(CacheKey::aggregated_stats(team_id, league_id), move || async move {
                store
                    .fetch_aggregated_stats(&team_id_owned, league_id_owned.as_deref())
                    .await
            })
            .await
    }

    async fn league_stats(&self, league_id: &str) -> Result<Vec<LeagueStatsRow>> {
        let store = Arc::clone(&self.store);
        let league_id_owned = league_id.to_string();
        self.league_stats
            .get_or_fetch(CacheKey::LeagueStats(league_id.to_string()), move || async move {
                store.fetch_league_stats(&league_id_owned).await
            })
            .await
    }

    async fn standings(&self, league_id: &str) -> Result<Vec<StandingsRow>> {
        let store = Arc::clone(&self.store);
        let league_id_owned = league_id.to_string();
        self.standings
            .get_or_fetch(CacheKey::Standings(league_id.to_string()), move || async move {
                store.fetch_standings_fallback(&league_id_owned).await
            })
            .await
    }

    async fn league_position(&self, team: &Team) -> Result<Option<u32>> {
        let Some(league_id) = team.league_id.as_deref() else {
            return Ok(None);
        };
        let rows = self.standings(league_id).await?;
        Ok(rows
            .iter()
            .find(|row| row.team_id == team.id && row.position > 0)
            .map(|row| row.position))
    }

    /// Compares two teams, or `None` when either team is unknown.
    pub async fn compare(&self, team_a: &str, team_b: &str) -> Result<Option<ComparisonResult>> {
        let (a, b) = tokio::try_join!(self.team(team_a, false), self.team(team_b, false))?;
        let (Some(a), Some(b)) = (a, b) else {
            tracing::debug!("Comparison {} vs {} skipped, team missing", team_a, team_b);
            return Ok(None);
        };

        let (stats_a, stats_b, position_a, position_b, history) = tokio::try_join!(
            self.stats_for(&a),
            self.stats_for(&b),
            self.league_position(&a),
            self.league_position(&b),
            self.fixtures(&a.id, false),
        )?;

        let side_a = ComparisonSide::new(stats_a).with_position(position_a);
        let side_b = ComparisonSide::new(stats_b).with_position(position_b);

        Ok(Some(comparison_engine::compare(&side_a, &side_b, &history)))
    }

    /// Top `limit` teams of a league by `statistic`.
    ///
    /// Published league stats are preferred; without them the standings
    /// table is used, which cannot answer clean sheets or possession.
    pub async fn rank(&self, league_id: &str, statistic: Statistic, limit: Option<usize>) -> Result<Ranking> {
        let limit = limit.unwrap_or(self.ranking_default_limit);
        let league_rows = self.league_stats(league_id).await?;

        let (source, entries) = if !league_rows.is_empty() {
            let ids: Vec<&str> = league_rows.iter().map(|r| r.team_id.as_str()).collect();
            let teams = self.resolve_teams(&ids).await;
            (
                RankingSource::LeagueStats,
                ranking_engine::rank_league_stats(&league_rows, statistic, limit, &teams),
            )
        } else {
            let rows = self.standings(league_id).await?;
            if !ranking_engine::standings_support(statistic) {
                tracing::info!(
                    "No league stats for {} and standings carry no {}, ranking is empty",
                    league_id,
                    statistic
                );
                (RankingSource::Standings, Vec::new())
            } else {
                let ids: Vec<&str> = rows.iter().map(|r| r.team_id.as_str()).collect();
                let teams = self.resolve_teams(&ids).await;
                (
                    RankingSource::Standings,
                    ranking_engine::rank_standings(&rows, statistic, limit, &teams),
                )
            }
        };

        Ok(Ranking {
            league_id: league_id.to_string(),
            statistic,
            source,
            entries,
        })
    }

    // Team records are display hints here; a failed lookup just leaves the team out
    async fn resolve_teams(&self, ids: &[&str]) -> HashMap<String, Team> {
        let lookups = ids.iter().map(|id| self.team(id, false));
        let results = futures::future::join_all(lookups).await;

        let mut teams = HashMap::new();
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(Some(team)) => {
                    teams.insert(team.id.clone(), team);
                }
                Ok(None) => tracing::debug!("Ranked team {} has no team record", id),
                Err(e) => tracing::warn!("Could not resolve team {} for ranking: {}", id, e),
            }
        }
        teams
    }

    /// Drops the ready entry for `key` from whichever cache holds it.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        match key {
            CacheKey::Teams { .. } => self.teams.invalidate(key),
            CacheKey::TeamById(_) => self.team.invalidate(key),
            CacheKey::TeamPlayers(_) => self.players.invalidate(key),
            CacheKey::TeamFixtures(_) => self.fixtures.invalidate(key),
            CacheKey::AggregatedStats { .. } => self.aggregated.invalidate(key),
            CacheKey::LeagueStats(_) => self.league_stats.invalidate(key),
            CacheKey::Standings(_) => self.standings.invalidate(key),
        }
    }

    /// Drops every cached record that belongs to `team_id`.
    pub fn invalidate_team(&self, team_id: &str) -> usize {
        let concerns = |key: &CacheKey| key.concerns_team(team_id);
        self.team.invalidate_matching(concerns)
            + self.players.invalidate_matching(concerns)
            + self.fixtures.invalidate_matching(concerns)
            + self.aggregated.invalidate_matching(concerns)
    }

    /// Forgets everything, e.g. on sign-out.
    pub fn invalidate_all(&self) {
        self.teams.invalidate_all();
        self.team.invalidate_all();
        self.players.invalidate_all();
        self.fixtures.invalidate_all();
        self.aggregated.invalidate_all();
        self.league_stats.invalidate_all();
        self.standings.invalidate_all();
    }
}
