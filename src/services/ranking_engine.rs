// src/services/ranking_engine.rs
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::ranking::{LeagueStatsRow, RankingEntry, Statistic, StandingsRow};
use crate::models::team::Team;

/// Which source a ranking was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RankingSource {
    LeagueStats,
    Standings,
}

struct Candidate<'a> {
    team_id: &'a str,
    team_name: Option<&'a str>,
    value: f64,
}

/// Ranks aggregated league rows. Rows without a value for `statistic` are skipped.
pub fn rank_league_stats(
    rows: &[LeagueStatsRow],
    statistic: Statistic,
    limit: usize,
    teams: &HashMap<String, Team>,
) -> Vec<RankingEntry> {
    let candidates = rows
        .iter()
        .filter_map(|row| {
            row.value_of(statistic).map(|value| Candidate {
                team_id: &row.team_id,
                team_name: row.team_name.as_deref(),
                value,
            })
        })
        .collect();

    finish(candidates, statistic, limit, teams)
}

/// Ranks standings rows. Statistics the table does not carry produce an empty ranking.
pub fn rank_standings(
    rows: &[StandingsRow],
    statistic: Statistic,
    limit: usize,
    teams: &HashMap<String, Team>,
) -> Vec<RankingEntry> {
    let candidates = rows
        .iter()
        .filter_map(|row| {
            row.value_of(statistic).map(|value| Candidate {
                team_id: &row.team_id,
                team_name: row.team_name.as_deref(),
                value,
            })
        })
        .collect();

    finish(candidates, statistic, limit, teams)
}

/// Whether standings can answer `statistic` at all.
pub fn standings_support(statistic: Statistic) -> bool {
    !matches!(statistic, Statistic::CleanSheets | Statistic::Possession)
}

fn finish(
    mut candidates: Vec<Candidate<'_>>,
    statistic: Statistic,
    limit: usize,
    teams: &HashMap<String, Team>,
) -> Vec<RankingEntry> {
    candidates.retain(|c| c.value.is_finite());
    candidates.sort_by(|a, b| compare_values(a.value, b.value, statistic).then_with(|| a.team_id.cmp(b.team_id)));

    candidates
        .into_iter()
        .take(limit)
        .map(|c| {
            let team = teams.get(c.team_id);
            let team_name = c
                .team_name
                .map(str::to_string)
                .or_else(|| team.map(|t| t.name.clone()))
                .unwrap_or_else(|| c.team_id.to_string());
            RankingEntry {
                team_id: c.team_id.to_string(),
                team_name,
                value: c.value,
                color_primary: team.and_then(|t| t.color_primary.clone()),
            }
        })
        .collect()
}

// Best value first
fn compare_values(a: f64, b: f64, statistic: Statistic) -> Ordering {
    let ascending = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    if statistic.higher_is_better() {
        ascending.reverse()
    } else {
        ascending
    }
}
