// src/services/fixture_classifier.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::fixture::{Fixture, FixtureStatus};
use crate::services::date_normalizer::normalize_or;

/// A team's fixtures split into three disjoint, ordered buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedFixtures {
    /// In source order.
    pub live: Vec<Fixture>,
    /// Soonest first.
    pub upcoming: Vec<Fixture>,
    /// Most recent first.
    pub past: Vec<Fixture>,
    /// Ids of fixtures whose date could not be read and was taken as `now`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub malformed_dates: Vec<String>,
}

impl ClassifiedFixtures {
    pub fn next_fixture(&self) -> Option<&Fixture> {
        self.live.first().or_else(|| self.upcoming.first())
    }

    pub fn last_result(&self) -> Option<&Fixture> {
        self.past.first()
    }

    pub fn len(&self) -> usize {
        self.live.len() + self.upcoming.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Buckets `team_id`'s fixtures relative to `now`.
///
/// Fixtures of other teams are skipped; every other fixture lands in exactly
/// one bucket. Only scheduled fixtures dated after `now` are upcoming;
/// overdue scheduled, postponed and cancelled fixtures go to `past`.
/// Ties keep input order.
pub fn classify(team_id: &str, fixtures: &[Fixture], now: DateTime<Utc>) -> ClassifiedFixtures {
    let mut live = Vec::new();
    let mut upcoming: Vec<(DateTime<Utc>, &Fixture)> = Vec::new();
    let mut past: Vec<(DateTime<Utc>, &Fixture)> = Vec::new();
    let mut malformed_dates = Vec::new();

    for fixture in fixtures.iter().filter(|f| f.involves(team_id)) {
        if fixture.status == FixtureStatus::Live {
            live.push(fixture.clone());
            continue;
        }

        let (kickoff, warning) = normalize_or(&fixture.date, now);
        if warning.is_some() {
            malformed_dates.push(fixture.id.clone());
        }

        match fixture.status {
            FixtureStatus::Scheduled if kickoff > now => {
                upcoming.push((kickoff, fixture))
            }
            _ => past.push((kickoff, fixture)),
        }
    }

    // sort_by is stable, equal dates keep input order
    upcoming.sort_by(|a, b| a.0.cmp(&b.0));
    past.sort_by(|a, b| b.0.cmp(&a.0));

    let classified = ClassifiedFixtures {
        live,
        upcoming: upcoming.into_iter().map(|(_, f)| f.clone()).collect(),
        past: past.into_iter().map(|(_, f)| f.clone()).collect(),
        malformed_dates,
    };

    tracing::debug!(
        "Classified fixtures for {}: {} live, {} upcoming, {} past",
        team_id,
        classified.live.len(),
        classified.upcoming.len(),
        classified.past.len()
    );

    classified
}
