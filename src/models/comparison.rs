use serde::{Deserialize, Serialize};

use crate::models::stats::TeamSeasonStats;

/// All completed meetings between two teams, counted from team A's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHead {
    pub matches: u32,
    pub team_a_wins: u32,
    pub team_b_wins: u32,
    pub draws: u32,
    pub team_a_goals: u32,
    pub team_b_goals: u32,
}

impl HeadToHead {
    /// The same record seen from team B's side.
    pub fn swapped(&self) -> Self {
        HeadToHead {
            matches: self.matches,
            team_a_wins: self.team_b_wins,
            team_b_wins: self.team_a_wins,
            draws: self.draws,
            team_a_goals: self.team_b_goals,
            team_b_goals: self.team_a_goals,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    A,
    B,
    #[serde(rename = "tie")]
    Tie,
    #[serde(rename = "undefined")]
    Undefined,
}

impl Winner {
    pub fn swapped(self) -> Self {
        match self {
            Winner::A => Winner::B,
            Winner::B => Winner::A,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    pub label: String,
    pub value_a: Option<f64>,
    pub value_b: Option<f64>,
    pub higher_is_better: bool,
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub team_a: TeamSeasonStats,
    pub team_b: TeamSeasonStats,
    pub head_to_head: HeadToHead,
    pub metrics: Vec<MetricComparison>,
}
