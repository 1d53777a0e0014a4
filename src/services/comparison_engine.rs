// src/services/comparison_engine.rs
use crate::models::comparison::{ComparisonResult, HeadToHead, MetricComparison, Winner};
use crate::models::fixture::{Fixture, FixtureStatus};
use crate::models::stats::{MatchResult, TeamSeasonStats};

/// One team's input to a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSide {
    pub stats: TeamSeasonStats,
    pub league_position: Option<u32>,
}

impl ComparisonSide {
    pub fn new(stats: TeamSeasonStats) -> Self {
        Self {
            stats,
            league_position: None,
        }
    }

    pub fn with_position(mut self, position: Option<u32>) -> Self {
        self.league_position = position;
        self
    }
}

type MetricFn = fn(&ComparisonSide) -> Option<f64>;

// (label, higher is better, extractor)
const METRICS: &[(&str, bool, MetricFn)] = &[
    ("League Position", false, |s| s.league_position.map(f64::from)),
    ("Points", true, |s| Some(s.stats.points as f64)),
    ("Wins", true, |s| Some(s.stats.wins as f64)),
    ("Losses", false, |s| Some(s.stats.losses as f64)),
    ("Goals Scored", true, |s| Some(s.stats.goals_for as f64)),
    ("Goals Conceded", false, |s| Some(s.stats.goals_against as f64)),
    ("Goal Difference", true, |s| Some(s.stats.goal_difference as f64)),
    ("Clean Sheets", true, |s| Some(s.stats.clean_sheets as f64)),
    ("Win %", true, |s| Some(s.stats.win_percentage as f64)),
];

/// Decides one metric. Absent or non-finite values are `Undefined`.
pub fn winner(a: Option<f64>, b: Option<f64>, higher_is_better: bool) -> Winner {
    match (a, b) {
        (Some(a), Some(b)) if a.is_finite() && b.is_finite() => {
            if a == b {
                Winner::Tie
            } else if (a > b) == higher_is_better {
                Winner::A
            } else {
                Winner::B
            }
        }
        _ => Winner::Undefined,
    }
}

/// Completed meetings between `team_a` and `team_b`, from A's side.
pub fn head_to_head(team_a: &str, team_b: &str, fixtures: &[Fixture]) -> HeadToHead {
    let mut h2h = HeadToHead::default();

    for fixture in fixtures
        .iter()
        .filter(|f| f.status == FixtureStatus::Completed && f.is_between(team_a, team_b))
    {
        let Some((a_goals, b_goals)) = fixture.scores_for(team_a) else {
            continue;
        };
        h2h.matches += 1;
        h2h.team_a_goals += a_goals;
        h2h.team_b_goals += b_goals;
        match MatchResult::from_scores(a_goals, b_goals) {
            MatchResult::W => h2h.team_a_wins += 1,
            MatchResult::D => h2h.draws += 1,
            MatchResult::L => h2h.team_b_wins += 1,
        }
    }

    h2h
}

/// Metric-by-metric comparison. Swapping `a` and `b` swaps every A/B winner.
pub fn compare(a: &ComparisonSide, b: &ComparisonSide, fixtures: &[Fixture]) -> ComparisonResult {
    let metrics = METRICS
        .iter()
        .map(|(label, higher_is_better, extract)| {
            let value_a = extract(a);
            let value_b = extract(b);
            MetricComparison {
                label: label.to_string(),
                value_a,
                value_b,
                higher_is_better: *higher_is_better,
                winner: winner(value_a, value_b, *higher_is_better),
            }
        })
        .collect();

    ComparisonResult {
        team_a: a.stats.clone(),
        team_b: b.stats.clone(),
        head_to_head: head_to_head(&a.stats.team_id, &b.stats.team_id, fixtures),
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::date_normalizer::RawDate;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn stats(team_id: &str, wins: u32, draws: u32, losses: u32, goals_for: u32, goals_against: u32) -> TeamSeasonStats {
        TeamSeasonStats {
            team_id: team_id.into(),
            wins,
            draws,
            losses,
            goals_for,
            goals_against,
            ..Default::default()
        }
        .with_derived_fields()
    }

    fn result(id: &str, home: &str, away: &str, home_score: u32, away_score: u32) -> Fixture {
        Fixture {
            id: id.into(),
            home_team_id: home.into(),
            away_team_id: away.into(),
            date: RawDate::Text("2026-09-01".into()),
            status: FixtureStatus::Completed,
            home_score: Some(home_score),
            away_score: Some(away_score),
            venue: None,
            competition: None,
        }
    }

    fn metric<'a>(result: &'a ComparisonResult, label: &str) -> &'a MetricComparison {
        result.metrics.iter().find(|m| m.label == label).unwrap()
    }

    #[test]
    fn winner_rules() {
        assert_eq!(winner(Some(3.0), Some(1.0), true), Winner::A);
        assert_eq!(winner(Some(3.0), Some(1.0), false), Winner::B);
        assert_eq!(winner(Some(2.0), Some(2.0), true), Winner::Tie);
        assert_eq!(winner(None, Some(2.0), true), Winner::Undefined);
        assert_eq!(winner(Some(f64::NAN), Some(2.0), false), Winner::Undefined);
    }

    #[test]
    fn head_to_head_counts_both_venues() {
        let fixtures = vec![
            result("f1", "a", "b", 2, 0),
            result("f2", "b", "a", 1, 1),
            result("f3", "b", "a", 3, 1),
            result("f4", "a", "c", 5, 0),
        ];

        let h2h = head_to_head("a", "b", &fixtures);

        assert_eq!(h2h.matches, 3);
        assert_eq!((h2h.team_a_wins, h2h.team_b_wins, h2h.draws), (1, 1, 1));
        assert_eq!((h2h.team_a_goals, h2h.team_b_goals), (4, 4));
        assert_eq!(head_to_head("b", "a", &fixtures), h2h.swapped());
    }

    #[test]
    fn lower_is_better_metrics_favour_fewer() {
        let a = ComparisonSide::new(stats("a", 6, 2, 2, 20, 8)).with_position(Some(1));
        let b = ComparisonSide::new(stats("b", 6, 2, 2, 20, 12)).with_position(Some(4));

        let result = compare(&a, &b, &[]);

        assert_eq!(metric(&result, "League Position").winner, Winner::A);
        assert_eq!(metric(&result, "Goals Conceded").winner, Winner::A);
        assert_eq!(metric(&result, "Points").winner, Winner::Tie);
        assert_eq!(metric(&result, "Goal Difference").winner, Winner::A);
        assert_eq!(result.head_to_head, HeadToHead::default());
    }

    #[test]
    fn unknown_position_is_undefined() {
        let a = ComparisonSide::new(stats("a", 1, 0, 0, 1, 0)).with_position(Some(2));
        let b = ComparisonSide::new(stats("b", 0, 0, 1, 0, 1));

        let result = compare(&a, &b, &[]);

        assert_eq!(metric(&result, "League Position").winner, Winner::Undefined);
        assert_eq!(metric(&result, "Wins").winner, Winner::A);
    }

    #[test]
    fn swapping_teams_swaps_every_winner() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let mut side = |id: &str| {
                let position = rng.gen_bool(0.7).then(|| rng.gen_range(1..20));
                ComparisonSide::new(stats(
                    id,
                    rng.gen_range(0..15),
                    rng.gen_range(0..15),
                    rng.gen_range(0..15),
                    rng.gen_range(0..50),
                    rng.gen_range(0..50),
                ))
                .with_position(position)
            };
            let a = side("a");
            let b = side("b");
            let fixtures = vec![result("f1", "a", "b", 2, 1), result("f2", "b", "a", 0, 0)];

            let forward = compare(&a, &b, &fixtures);
            let backward = compare(&b, &a, &fixtures);

            assert_eq!(forward.metrics.len(), backward.metrics.len());
            for (f, r) in forward.metrics.iter().zip(&backward.metrics) {
                assert_eq!(f.label, r.label);
                assert_eq!(f.winner, r.winner.swapped(), "metric {}", f.label);
            }
            assert_eq!(forward.head_to_head, backward.head_to_head.swapped());
        }
    }
}
