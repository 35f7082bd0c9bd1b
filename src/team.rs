use crate::errors::{Error, ErrorKind};
use crate::stats::{Outcome, Player, Side};

/// One of the two sides of a match, with its members in payload order
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    side: Side,
    outcome: Outcome,
    players: Vec<Player>,
}

impl Team {
    /// Collects the players fighting on the given side
    ///
    /// The outcome is taken from the first member; the payload records the
    /// same outcome for every member of a side, and this function does not
    /// re-verify that.
    pub(crate) fn assemble(side: Side, players: &[Player]) -> Result<Team, Error> {
        let members: Vec<Player> = players.iter().filter(|p| p.side == side).cloned().collect();
        let outcome = members
            .first()
            .map(|p| p.outcome)
            .ok_or_else(|| Error::new(ErrorKind::EmptyTeam(side)))?;

        Ok(Team {
            side,
            outcome,
            players: members,
        })
    }

    /// The side this team fought on
    pub fn side(&self) -> Side {
        self.side
    }

    /// How the game ended for this team
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The members of this team, in payload order
    pub fn players(&self) -> &[Player] {
        &self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Inventory, Kda, Lane};

    fn player(name: &str, side: Side, outcome: Outcome) -> Player {
        Player {
            id: 1,
            name: name.to_string(),
            champion: "Sona".to_string(),
            outcome,
            level: 10,
            minion_score: 0,
            keystone: 0,
            summoner_spells: (0, 0),
            side,
            lane: Lane::Support,
            kda: Kda {
                kills: 0,
                deaths: 0,
                assists: 0,
            },
            inventory: Inventory {
                items: [0; 6],
                trinket: 0,
            },
        }
    }

    #[test]
    fn collects_only_matching_side_in_order() {
        let players = vec![
            player("a", Side::Purple, Outcome::Victory),
            player("b", Side::Blue, Outcome::Defeat),
            player("c", Side::Purple, Outcome::Victory),
        ];

        let team = Team::assemble(Side::Purple, &players).unwrap();
        assert_eq!(team.side(), Side::Purple);
        assert_eq!(team.outcome(), Outcome::Victory);
        let names: Vec<&str> = team.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn outcome_comes_from_first_member() {
        let players = vec![
            player("a", Side::Blue, Outcome::Defeat),
            player("b", Side::Blue, Outcome::Victory),
        ];

        let team = Team::assemble(Side::Blue, &players).unwrap();
        assert_eq!(team.outcome(), Outcome::Defeat);
    }

    #[test]
    fn empty_side_is_an_error() {
        let players = vec![player("a", Side::Purple, Outcome::Victory)];
        let err = Team::assemble(Side::Blue, &players).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::EmptyTeam(Side::Blue)));
    }
}
