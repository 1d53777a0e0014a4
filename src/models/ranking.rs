use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Statistics a league can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Statistic {
    GoalsFor,
    GoalsAgainst,
    CleanSheets,
    Possession,
    Points,
    Wins,
}

impl Statistic {
    /// Goals conceded ranks ascending; everything else descending.
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, Statistic::GoalsAgainst)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::GoalsFor => "goalsFor",
            Statistic::GoalsAgainst => "goalsAgainst",
            Statistic::CleanSheets => "cleanSheets",
            Statistic::Possession => "possession",
            Statistic::Points => "points",
            Statistic::Wins => "wins",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Statistic {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "goalsFor" | "goalsScored" | "goals_for" => Ok(Statistic::GoalsFor),
            "goalsAgainst" | "goalsConceded" | "goals_against" => Ok(Statistic::GoalsAgainst),
            "cleanSheets" | "clean_sheets" => Ok(Statistic::CleanSheets),
            "possession" => Ok(Statistic::Possession),
            "points" => Ok(Statistic::Points),
            "wins" => Ok(Statistic::Wins),
            other => Err(AppError::invalid_data(format!("Unknown statistic '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub team_id: String,
    pub team_name: String,
    pub value: f64,
    /// Display hint only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_primary: Option<String>,
}

// Document in the `team_stats` collection, one per team and league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueStatsRow {
    pub team_id: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub league_id: String,
    #[serde(default)]
    pub goals_for: u32,
    #[serde(default)]
    pub goals_against: u32,
    #[serde(default)]
    pub clean_sheets: Option<u32>,
    #[serde(default)]
    pub possession: Option<f64>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub points: u32,
}

impl LeagueStatsRow {
    pub fn value_of(&self, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::GoalsFor => Some(self.goals_for as f64),
            Statistic::GoalsAgainst => Some(self.goals_against as f64),
            Statistic::CleanSheets => self.clean_sheets.map(f64::from),
            Statistic::Possession => self.possession,
            Statistic::Points => Some(self.points as f64),
            Statistic::Wins => Some(self.wins as f64),
        }
    }
}

// League table row in the `standings` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub team_id: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub league_id: String,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub won: u32,
    #[serde(default)]
    pub drawn: u32,
    #[serde(default)]
    pub lost: u32,
    #[serde(default)]
    pub goals_for: u32,
    #[serde(default)]
    pub goals_against: u32,
    #[serde(default)]
    pub points: u32,
}

impl StandingsRow {
    /// Standings carry no clean sheets or possession; those stay `None`.
    pub fn value_of(&self, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::GoalsFor => Some(self.goals_for as f64),
            Statistic::GoalsAgainst => Some(self.goals_against as f64),
            Statistic::Points => Some(self.points as f64),
            Statistic::Wins => Some(self.won as f64),
            Statistic::CleanSheets | Statistic::Possession => None,
        }
    }
}
