use std::fmt;

use crate::models::team::TeamType;

/// Composite key for every store read routed through the request caches.
///
/// Equality is structural, so two distinct requests never collide even when
/// an id happens to contain the `:` used by the display form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Teams {
        kind: Option<TeamType>,
        division: Option<String>,
    },
    TeamById(String),
    TeamPlayers(String),
    TeamFixtures(String),
    AggregatedStats {
        team_id: String,
        league_id: Option<String>,
    },
    LeagueStats(String),
    Standings(String),
}

impl CacheKey {
    pub fn teams(kind: Option<TeamType>, division: Option<&str>) -> Self {
        CacheKey::Teams {
            kind,
            division: division.map(str::to_string),
        }
    }

    pub fn aggregated_stats(team_id: &str, league_id: Option<&str>) -> Self {
        CacheKey::AggregatedStats {
            team_id: team_id.to_string(),
            league_id: league_id.map(str::to_string),
        }
    }

    /// True when the key belongs to `team_id`'s own records.
    pub fn concerns_team(&self, team_id: &str) -> bool {
        match self {
            CacheKey::TeamById(id) | CacheKey::TeamPlayers(id) | CacheKey::TeamFixtures(id) => {
                id == team_id
            }
            CacheKey::AggregatedStats { team_id: id, .. } => id == team_id,
            _ => false,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Teams { kind, division } => write!(
                f,
                "teams:{}:{}",
                kind.map(|k| k.as_str()).unwrap_or("all"),
                division.as_deref().unwrap_or("all")
            ),
            CacheKey::TeamById(id) => write!(f, "teamById:{}", id),
            CacheKey::TeamPlayers(id) => write!(f, "teamPlayers:{}", id),
            CacheKey::TeamFixtures(id) => write!(f, "teamFixtures:{}", id),
            CacheKey::AggregatedStats { team_id, league_id } => write!(
                f,
                "aggregatedStats:{}:{}",
                team_id,
                league_id.as_deref().unwrap_or("all")
            ),
            CacheKey::LeagueStats(id) => write!(f, "leagueStats:{}", id),
            CacheKey::Standings(id) => write!(f, "standings:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_documented_key_shapes() {
        assert_eq!(CacheKey::teams(Some(TeamType::Club), Some("premier")).to_string(), "teams:club:premier");
        assert_eq!(CacheKey::teams(None, None).to_string(), "teams:all:all");
        assert_eq!(CacheKey::TeamById("t1".into()).to_string(), "teamById:t1");
        assert_eq!(CacheKey::TeamPlayers("t1".into()).to_string(), "teamPlayers:t1");
    }

    #[test]
    fn identical_requests_produce_equal_keys() {
        assert_eq!(
            CacheKey::teams(Some(TeamType::National), Some("u21")),
            CacheKey::teams(Some(TeamType::National), Some("u21"))
        );
    }

    #[test]
    fn keys_with_separators_do_not_collide() {
        let one = CacheKey::aggregated_stats("a:b", None);
        let two = CacheKey::aggregated_stats("a", Some("b:all"));
        assert_eq!(one.to_string(), two.to_string());
        assert_ne!(one, two);

        // "all" as a literal division is not the same request as no division
        assert_ne!(CacheKey::teams(None, Some("all")), CacheKey::teams(None, None));
    }

    #[test]
    fn team_scoped_keys_are_recognised() {
        assert!(CacheKey::TeamFixtures("t1".into()).concerns_team("t1"));
        assert!(CacheKey::aggregated_stats("t1", Some("l1")).concerns_team("t1"));
        assert!(!CacheKey::Standings("t1".into()).concerns_team("t1"));
    }
}
