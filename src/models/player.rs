use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

// Player document - `teamId` is a back-reference, not ownership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(
        rename(serialize = "id", deserialize = "_id"),
        deserialize_with = "crate::models::document_id::deserialize"
    )]
    pub id: String,

    pub team_id: String,

    #[serde(default)]
    pub name: String,

    pub position: Position,

    #[serde(default)]
    pub number: u32,
}

/// A team's players grouped by position, each group ordered by shirt number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Squad {
    pub goalkeepers: Vec<Player>,
    pub defenders: Vec<Player>,
    pub midfielders: Vec<Player>,
    pub forwards: Vec<Player>,
}

impl Squad {
    pub fn from_players(players: &[Player]) -> Self {
        let mut squad = Squad::default();
        for player in players {
            let group = match player.position {
                Position::Goalkeeper => &mut squad.goalkeepers,
                Position::Defender => &mut squad.defenders,
                Position::Midfielder => &mut squad.midfielders,
                Position::Forward => &mut squad.forwards,
            };
            group.push(player.clone());
        }
        for group in [
            &mut squad.goalkeepers,
            &mut squad.defenders,
            &mut squad.midfielders,
            &mut squad.forwards,
        ] {
            group.sort_by_key(|p| p.number);
        }
        squad
    }

    pub fn len(&self) -> usize {
        self.goalkeepers.len() + self.defenders.len() + self.midfielders.len() + self.forwards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
