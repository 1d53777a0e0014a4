use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::fixture::Fixture;
use crate::models::team::TeamType;
use crate::services::fixture_classifier::ClassifiedFixtures;

#[derive(Debug, Default, Deserialize)]
pub struct TeamsQuery {
    #[serde(rename = "type")]
    pub kind: Option<TeamType>,
    pub division: Option<String>,
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CompareQuery {
    #[validate(length(min = 1, message = "team_a is required"))]
    pub team_a: String,

    #[validate(length(min = 1, message = "team_b is required"))]
    pub team_b: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct RankingQuery {
    pub statistic: Option<String>,

    #[validate(range(min = 1, max = 50, message = "limit must be between 1 and 50"))]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixturesResponse {
    pub team_id: String,
    #[serde(flatten)]
    pub fixtures: ClassifiedFixtures,
    pub next_fixture: Option<Fixture>,
    pub last_result: Option<Fixture>,
}

impl FixturesResponse {
    pub fn new(team_id: impl Into<String>, fixtures: ClassifiedFixtures) -> Self {
        let next_fixture = fixtures.next_fixture().cloned();
        let last_result = fixtures.last_result().cloned();
        Self {
            team_id: team_id.into(),
            fixtures,
            next_fixture,
            last_result,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CacheClearResponse {
    pub success: bool,
    pub message: String,
}
