use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamType {
    Club,
    National,
}

impl TeamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamType::Club => "club",
            TeamType::National => "national",
        }
    }
}

impl fmt::Display for TeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "club" => Ok(TeamType::Club),
            "national" => Ok(TeamType::National),
            other => Err(AppError::invalid_data(format!(
                "Invalid team type '{}'. Must be 'club' or 'national'",
                other
            ))),
        }
    }
}

// Team document - matches the `teams` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(
        rename(serialize = "id", deserialize = "_id"),
        deserialize_with = "crate::models::document_id::deserialize"
    )]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub division: String,

    #[serde(rename = "type")]
    pub kind: TeamType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_primary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league_id: Option<String>,
}
