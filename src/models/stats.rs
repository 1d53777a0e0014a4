use serde::{Deserialize, Serialize};

/// Outcome of one match from a team's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    W,
    D,
    L,
}

impl MatchResult {
    pub fn from_scores(team_score: u32, opponent_score: u32) -> Self {
        match team_score.cmp(&opponent_score) {
            std::cmp::Ordering::Greater => MatchResult::W,
            std::cmp::Ordering::Equal => MatchResult::D,
            std::cmp::Ordering::Less => MatchResult::L,
        }
    }
}

pub const FORM_LENGTH: usize = 5;

/// Season record derived from completed fixtures (or read from a
/// precomputed `team_stats` document). Never persisted by the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamSeasonStats {
    pub team_id: String,
    pub matches: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub clean_sheets: u32,
    pub win_percentage: u8,
    /// Most recent first, at most five entries.
    pub form: Vec<MatchResult>,
    pub points: u32,
}

impl TeamSeasonStats {
    pub fn empty(team_id: impl Into<String>) -> Self {
        TeamSeasonStats {
            team_id: team_id.into(),
            ..Default::default()
        }
    }

    /// Recomputes every derived field from the raw counters.
    ///
    /// Precomputed documents are not trusted to carry consistent derived
    /// values, so anything read from the store passes through here.
    pub fn with_derived_fields(mut self) -> Self {
        self.matches = self.wins.saturating_add(self.draws).saturating_add(self.losses);
        self.goal_difference = goal_difference(self.goals_for, self.goals_against);
        self.win_percentage = win_percentage(self.wins, self.matches);
        self.points = points(self.wins, self.draws);
        self.form.truncate(FORM_LENGTH);
        self
    }
}

/// Counters come from store documents, so the arithmetic saturates.
pub fn points(wins: u32, draws: u32) -> u32 {
    wins.saturating_mul(3).saturating_add(draws)
}

pub fn goal_difference(goals_for: u32, goals_against: u32) -> i32 {
    let diff = i64::from(goals_for) - i64::from(goals_against);
    diff.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// `round(100 × wins / matches)`, or 0 when no matches were played.
pub fn win_percentage(wins: u32, matches: u32) -> u8 {
    if matches == 0 {
        return 0;
    }
    let pct = (100.0 * wins as f64 / matches as f64).round();
    pct.clamp(0.0, 100.0) as u8
}
