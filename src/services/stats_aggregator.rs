// src/services/stats_aggregator.rs
use chrono::{DateTime, Utc};

use crate::models::fixture::{Fixture, FixtureStatus};
use crate::models::stats::{goal_difference, points, win_percentage, MatchResult, TeamSeasonStats, FORM_LENGTH};
use crate::services::date_normalizer::normalize_or;

/// Folds `team_id`'s completed fixtures into a season record.
///
/// Fixtures are folded oldest first (by normalized date, stable), each result
/// pushed to the front of the form, so `form` ends up most recent first
/// whatever order the caller supplies. A missing score counts as 0.
pub fn aggregate(team_id: &str, fixtures: &[Fixture], now: DateTime<Utc>) -> TeamSeasonStats {
    let mut completed: Vec<(DateTime<Utc>, &Fixture)> = fixtures
        .iter()
        .filter(|f| f.status == FixtureStatus::Completed && f.involves(team_id))
        .map(|f| (normalize_or(&f.date, now).0, f))
        .collect();
    completed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut stats = TeamSeasonStats::empty(team_id);
    let mut form: Vec<MatchResult> = Vec::with_capacity(completed.len());

    for (_, fixture) in completed {
        let Some((team_score, opponent_score)) = fixture.scores_for(team_id) else {
            continue;
        };

        stats.matches += 1;
        stats.goals_for = stats.goals_for.saturating_add(team_score);
        stats.goals_against = stats.goals_against.saturating_add(opponent_score);

        let result = MatchResult::from_scores(team_score, opponent_score);
        match result {
            MatchResult::W => stats.wins += 1,
            MatchResult::D => stats.draws += 1,
            MatchResult::L => stats.losses += 1,
        }
        form.insert(0, result);

        if opponent_score == 0 {
            stats.clean_sheets += 1;
        }
    }

    stats.goal_difference = goal_difference(stats.goals_for, stats.goals_against);
    stats.win_percentage = win_percentage(stats.wins, stats.matches);
    form.truncate(FORM_LENGTH);
    stats.form = form;
    stats.points = points(stats.wins, stats.draws);

    stats
}
