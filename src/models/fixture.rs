use serde::{Deserialize, Serialize};

use crate::services::date_normalizer::RawDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    Scheduled,
    Live,
    Completed,
    Postponed,
    Cancelled,
}

// Fixture document - a snapshot; the core never mutates fixtures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(
        rename(serialize = "id", deserialize = "_id"),
        deserialize_with = "crate::models::document_id::deserialize"
    )]
    pub id: String,

    pub home_team_id: String,

    pub away_team_id: String,

    pub date: RawDate,

    pub status: FixtureStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition: Option<String>,
}

impl Fixture {
    pub fn involves(&self, team_id: &str) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// True when the fixture is between `a` and `b`, in either home/away order.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.home_team_id == a && self.away_team_id == b)
            || (self.home_team_id == b && self.away_team_id == a)
    }

    /// `(team score, opponent score)` from `team_id`'s side. Absent scores read as 0.
    pub fn scores_for(&self, team_id: &str) -> Option<(u32, u32)> {
        let home = self.home_score.unwrap_or(0);
        let away = self.away_score.unwrap_or(0);
        if self.home_team_id == team_id {
            Some((home, away))
        } else if self.away_team_id == team_id {
            Some((away, home))
        } else {
            None
        }
    }
}
