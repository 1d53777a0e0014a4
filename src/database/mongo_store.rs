use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};

use crate::database::record_store::RecordStore;
use crate::errors::Result;
use crate::models::fixture::Fixture;
use crate::models::player::Player;
use crate::models::ranking::{LeagueStatsRow, StandingsRow};
use crate::models::stats::TeamSeasonStats;
use crate::models::team::{Team, TeamType};

const TEAMS: &str = "teams";
const PLAYERS: &str = "players";
const FIXTURES: &str = "fixtures";
const TEAM_STATS: &str = "team_stats";
const STANDINGS: &str = "standings";

#[derive(Clone)]
pub struct MongoRecordStore {
    db: Database,
}

impl MongoRecordStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn find_all<T>(&self, collection: &str, filter: Document) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned + Unpin + Send + Sync,
    {
        let start_time = std::time::Instant::now();
        let collection: Collection<T> = self.db.collection(collection);
        let cursor = collection.find(filter.clone()).await?;
        let records: Vec<T> = cursor.try_collect().await?;
        tracing::debug!(
            "Fetched {} documents from {} ({:?}) in {:?}",
            records.len(),
            collection.name(),
            filter,
            start_time.elapsed()
        );
        Ok(records)
    }
}

// Ids may be stored as strings or ObjectIds, match either
fn id_filter(field: &str, id: &str) -> Document {
    let mut by_string = Document::new();
    by_string.insert(field, id);

    match ObjectId::parse_str(id) {
        Ok(oid) => {
            let mut by_oid = Document::new();
            by_oid.insert(field, oid);
            doc! { "$or": [by_oid, by_string] }
        }
        Err(_) => by_string,
    }
}

#[async_trait]
impl RecordStore for MongoRecordStore {
    async fn fetch_teams(&self, kind: Option<TeamType>, division: Option<&str>) -> Result<Vec<Team>> {
        let mut filter = doc! {};
        if let Some(kind) = kind {
            filter.insert("type", kind.as_str());
        }
        if let Some(division) = division {
            filter.insert("division", division);
        }
        self.find_all(TEAMS, filter).await
    }

    async fn fetch_team_by_id(&self, id: &str) -> Result<Option<Team>> {
        let collection: Collection<Team> = self.db.collection(TEAMS);
        let team = collection.find_one(id_filter("_id", id)).await?;
        if team.is_none() {
            tracing::debug!("Team not found: {}", id);
        }
        Ok(team)
    }

    async fn fetch_team_players(&self, team_id: &str) -> Result<Vec<Player>> {
        self.find_all(PLAYERS, doc! { "teamId": team_id }).await
    }

    async fn fetch_team_fixtures(&self, team_id: &str) -> Result<Vec<Fixture>> {
        let filter = doc! {
            "$or": [ { "homeTeamId": team_id }, { "awayTeamId": team_id } ]
        };
        self.find_all(FIXTURES, filter).await
    }

    async fn fetch_aggregated_stats(
        &self,
        team_id: &str,
        league_id: Option<&str>,
    ) -> Result<Option<TeamSeasonStats>> {
        let collection: Collection<TeamSeasonStats> = self.db.collection(TEAM_STATS);
        let mut filter = doc! { "teamId": team_id };
        if let Some(league_id) = league_id {
            filter.insert("leagueId", league_id);
        }
        Ok(collection.find_one(filter).await?)
    }

    async fn fetch_league_stats(&self, league_id: &str) -> Result<Vec<LeagueStatsRow>> {
        self.find_all(TEAM_STATS, doc! { "leagueId": league_id }).await
    }

    async fn fetch_standings_fallback(&self, league_id: &str) -> Result<Vec<StandingsRow>> {
        let collection: Collection<StandingsRow> = self.db.collection(STANDINGS);
        let cursor = collection
            .find(doc! { "leagueId": league_id })
            .sort(doc! { "position": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
