use crate::errors::{Error, ErrorKind};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::convert::TryFrom;
use std::fmt;
use std::marker::PhantomData;

/// The side of the map a team plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Top-right side, team code 100
    Purple,

    /// Bottom-left side, team code 200
    Blue,
}

impl Side {
    /// Converts the raw team code into a side, rejecting unknown codes
    pub fn from_code(code: u64) -> Result<Side, Error> {
        match code {
            100 => Ok(Side::Purple),
            200 => Ok(Side::Blue),
            unknown => Err(Error::new(ErrorKind::UnknownSide(unknown))),
        }
    }

    /// Returns the raw team code for this side
    pub fn code(self) -> u64 {
        match self {
            Side::Purple => 100,
            Side::Blue => 200,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Purple => write!(f, "purple"),
            Side::Blue => write!(f, "blue"),
        }
    }
}

/// The lane a player was assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Position code 0
    Support,

    /// Position code 1
    Top,

    /// Position code 2
    Mid,

    /// Position code 3
    Jungle,

    /// Position code 4
    Bot,
}

impl Lane {
    /// Converts the raw position code into a lane, rejecting unknown codes
    pub fn from_code(code: u64) -> Result<Lane, Error> {
        match code {
            0 => Ok(Lane::Support),
            1 => Ok(Lane::Top),
            2 => Ok(Lane::Mid),
            3 => Ok(Lane::Jungle),
            4 => Ok(Lane::Bot),
            unknown => Err(Error::new(ErrorKind::UnknownLane(unknown))),
        }
    }

    /// Returns the raw position code for this lane
    pub fn code(self) -> u64 {
        match self {
            Lane::Support => 0,
            Lane::Top => 1,
            Lane::Mid => 2,
            Lane::Jungle => 3,
            Lane::Bot => 4,
        }
    }
}

/// How the game ended for a player or team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The game was won
    Victory,

    /// The game was lost
    Defeat,
}

impl Outcome {
    /// Derives the outcome from the raw `WIN` field
    ///
    /// The comparison is an exact string match against `"Win"`. Anything
    /// else, including a different casing, counts as a defeat -- this is how
    /// the client records the field.
    pub(crate) fn from_win(raw: &str) -> Outcome {
        if raw == "Win" {
            Outcome::Victory
        } else {
            Outcome::Defeat
        }
    }
}

/// Kills, deaths, and assists of a single player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kda {
    /// Total champions killed
    pub kills: u32,

    /// Total deaths
    pub deaths: u32,

    /// Total assists
    pub assists: u32,
}

impl Kda {
    /// The KDA ratio: `(kills + assists) / deaths`
    ///
    /// A deathless game has no finite ratio, so zero deaths yields
    /// `f64::INFINITY` rather than a division fault.
    ///
    /// ```
    /// use rofl::Kda;
    ///
    /// let kda = Kda { kills: 5, deaths: 2, assists: 3 };
    /// assert_eq!(kda.ratio(), 4.0);
    ///
    /// let deathless = Kda { kills: 1, deaths: 0, assists: 0 };
    /// assert!(deathless.ratio().is_infinite());
    /// ```
    pub fn ratio(&self) -> f64 {
        if self.deaths == 0 {
            f64::INFINITY
        } else {
            f64::from(self.kills + self.assists) / f64::from(self.deaths)
        }
    }
}

/// Item ids held at the end of the game
///
/// These are raw item ids; resolving them to item data is left to a static
/// data source. A zero id means the slot was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inventory {
    /// The six regular item slots
    pub items: [u32; 6],

    /// The trinket slot
    pub trinket: u32,
}

/// A single participant of the match
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Numeric account identifier
    pub id: u64,

    /// Display name
    pub name: String,

    /// Name of the champion played
    pub champion: String,

    /// Whether the player's team won
    pub outcome: Outcome,

    /// Champion level reached
    pub level: u32,

    /// Lane minions plus all neutral monsters killed
    pub minion_score: u32,

    /// Raw keystone rune id
    pub keystone: u32,

    /// Raw summoner spell ids, in cast-slot order
    pub summoner_spells: (u32, u32),

    /// The side the player fought on
    pub side: Side,

    /// The lane the player was assigned to
    pub lane: Lane,

    /// Combat statistics
    pub kda: Kda,

    /// End of game item ids
    pub inventory: Inventory,
}

/// A numeric stats field
///
/// Depending on the client version, counters in the stats document are
/// written either as JSON numbers or as decimal strings, so both shapes are
/// accepted. Negative and non-decimal values are rejected.
#[derive(Debug, Clone, Copy)]
struct Counter<T>(T);

impl<'de, T: TryFrom<u64>> Deserialize<'de> for Counter<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CounterVisitor<T>(PhantomData<T>);

        impl<'de, T: TryFrom<u64>> Visitor<'de> for CounterVisitor<T> {
            type Value = Counter<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a non-negative integer or a decimal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                T::try_from(v)
                    .map(Counter)
                    .map_err(|_| E::custom(format_args!("integer out of range: {}", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                let v = u64::try_from(v)
                    .map_err(|_| E::custom(format_args!("negative counter: {}", v)))?;
                self.visit_u64(v)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                let v = v
                    .parse::<u64>()
                    .map_err(|_| E::custom(format_args!("invalid counter string: {:?}", v)))?;
                self.visit_u64(v)
            }
        }

        deserializer.deserialize_any(CounterVisitor(PhantomData))
    }
}

/// One flat record of the nested stats document, keyed by the exact field
/// names the client writes
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "NAME")]
    name: String,
    #[serde(rename = "ID")]
    id: Counter<u64>,
    #[serde(rename = "SKIN")]
    champion: String,
    #[serde(rename = "LEVEL")]
    level: Counter<u32>,
    #[serde(rename = "TEAM")]
    team: Counter<u64>,
    #[serde(rename = "WIN")]
    win: String,
    #[serde(rename = "KEYSTONE_ID")]
    keystone: Counter<u32>,
    #[serde(rename = "CHAMPIONS_KILLED")]
    kills: Counter<u32>,
    #[serde(rename = "ASSISTS")]
    assists: Counter<u32>,
    #[serde(rename = "NUM_DEATHS")]
    deaths: Counter<u32>,
    #[serde(rename = "PLAYER_POSITION")]
    position: Counter<u64>,
    #[serde(rename = "MINIONS_KILLED")]
    minions_killed: Counter<u32>,
    #[serde(rename = "NEUTRAL_MINIONS_KILLED")]
    neutral_minions: Counter<u32>,
    #[serde(rename = "NEUTRAL_MINIONS_KILLED_YOUR_JUNGLE")]
    own_jungle_minions: Counter<u32>,
    #[serde(rename = "NEUTRAL_MINIONS_KILLED_ENEMY_JUNGLE")]
    enemy_jungle_minions: Counter<u32>,
    #[serde(rename = "ITEM0")]
    item0: Counter<u32>,
    #[serde(rename = "ITEM1")]
    item1: Counter<u32>,
    #[serde(rename = "ITEM2")]
    item2: Counter<u32>,
    #[serde(rename = "ITEM3")]
    item3: Counter<u32>,
    #[serde(rename = "ITEM4")]
    item4: Counter<u32>,
    #[serde(rename = "ITEM5")]
    item5: Counter<u32>,
    #[serde(rename = "ITEM6")]
    item6: Counter<u32>,
    #[serde(rename = "SUMMON_SPELL1_CAST")]
    spell1: Counter<u32>,
    #[serde(rename = "SUMMON_SPELL2_CAST")]
    spell2: Counter<u32>,
}

impl RawRecord {
    fn into_player(self) -> Result<Player, Error> {
        Ok(Player {
            id: self.id.0,
            name: self.name,
            champion: self.champion,
            outcome: Outcome::from_win(&self.win),
            level: self.level.0,
            minion_score: self.minions_killed.0
                + self.neutral_minions.0
                + self.own_jungle_minions.0
                + self.enemy_jungle_minions.0,
            keystone: self.keystone.0,
            summoner_spells: (self.spell1.0, self.spell2.0),
            side: Side::from_code(self.team.0)?,
            lane: Lane::from_code(self.position.0)?,
            kda: Kda {
                kills: self.kills.0,
                deaths: self.deaths.0,
                assists: self.assists.0,
            },
            // ITEM3 is the trinket slot; the remaining slots are the regular
            // items in display order
            inventory: Inventory {
                items: [
                    self.item0.0,
                    self.item1.0,
                    self.item2.0,
                    self.item4.0,
                    self.item5.0,
                    self.item6.0,
                ],
                trinket: self.item3.0,
            },
        })
    }
}

/// Decodes the nested stats document into players, preserving record order
///
/// The whole parse aborts on the first malformed record; a partial player
/// list is never returned.
pub(crate) fn parse_players(stats_json: &str) -> Result<Vec<Player>, Error> {
    let records: Vec<RawRecord> =
        serde_json::from_str(stats_json).map_err(|e| Error::new(ErrorKind::Stats(e)))?;

    records.into_iter().map(RawRecord::into_player).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn record(overrides: &[(&str, serde_json::Value)]) -> serde_json::Value {
        let mut record = serde_json::json!({
            "NAME": "Alice",
            "ID": 101,
            "SKIN": "Jinx",
            "LEVEL": 16,
            "TEAM": 100,
            "WIN": "Win",
            "KEYSTONE_ID": 8005,
            "CHAMPIONS_KILLED": 5,
            "ASSISTS": 3,
            "NUM_DEATHS": 2,
            "PLAYER_POSITION": 4,
            "MINIONS_KILLED": 10,
            "NEUTRAL_MINIONS_KILLED": 5,
            "NEUTRAL_MINIONS_KILLED_YOUR_JUNGLE": 3,
            "NEUTRAL_MINIONS_KILLED_ENEMY_JUNGLE": 2,
            "ITEM0": 1055,
            "ITEM1": 3006,
            "ITEM2": 3031,
            "ITEM3": 3363,
            "ITEM4": 3046,
            "ITEM5": 3072,
            "ITEM6": 0,
            "SUMMON_SPELL1_CAST": 7,
            "SUMMON_SPELL2_CAST": 4
        });
        for (key, value) in overrides {
            record[*key] = value.clone();
        }
        record
    }

    fn parse_single(overrides: &[(&str, serde_json::Value)]) -> Result<Player, Error> {
        let stats = serde_json::json!([record(overrides)]).to_string();
        parse_players(&stats).map(|mut players| players.remove(0))
    }

    #[test]
    fn maps_a_full_record() {
        let player = parse_single(&[]).unwrap();
        assert_eq!(player.id, 101);
        assert_eq!(player.name, "Alice");
        assert_eq!(player.champion, "Jinx");
        assert_eq!(player.outcome, Outcome::Victory);
        assert_eq!(player.level, 16);
        assert_eq!(player.keystone, 8005);
        assert_eq!(player.summoner_spells, (7, 4));
        assert_eq!(player.side, Side::Purple);
        assert_eq!(player.lane, Lane::Bot);
        assert_eq!(
            player.kda,
            Kda {
                kills: 5,
                deaths: 2,
                assists: 3
            }
        );
        assert_eq!(player.inventory.items, [1055, 3006, 3031, 3046, 3072, 0]);
        assert_eq!(player.inventory.trinket, 3363);
    }

    #[test]
    fn minion_score_sums_all_four_fields() {
        let player = parse_single(&[]).unwrap();
        assert_eq!(player.minion_score, 20);
    }

    #[rstest]
    #[case("Win", Outcome::Victory)]
    #[case("Fail", Outcome::Defeat)]
    #[case("WIN", Outcome::Defeat)]
    #[case("win", Outcome::Defeat)]
    #[case("", Outcome::Defeat)]
    fn outcome_is_exact_string_match(#[case] raw: &str, #[case] expected: Outcome) {
        let player = parse_single(&[("WIN", serde_json::json!(raw))]).unwrap();
        assert_eq!(player.outcome, expected);
    }

    #[rstest]
    #[case(5, 2, 3, 4.0)]
    #[case(0, 1, 0, 0.0)]
    #[case(3, 4, 0, 0.75)]
    fn kda_ratio(#[case] kills: u32, #[case] deaths: u32, #[case] assists: u32, #[case] expected: f64) {
        let kda = Kda {
            kills,
            deaths,
            assists,
        };
        assert_eq!(kda.ratio(), expected);
    }

    #[test]
    fn zero_deaths_ratio_is_infinite() {
        let kda = Kda {
            kills: 5,
            deaths: 0,
            assists: 3,
        };
        assert!(kda.ratio().is_infinite());
    }

    #[test]
    fn counters_accept_decimal_strings() {
        let player = parse_single(&[
            ("LEVEL", serde_json::json!("16")),
            ("TEAM", serde_json::json!("100")),
            ("CHAMPIONS_KILLED", serde_json::json!("5")),
        ])
        .unwrap();
        assert_eq!(player.level, 16);
        assert_eq!(player.side, Side::Purple);
        assert_eq!(player.kda.kills, 5);
    }

    #[test]
    fn unknown_team_code_rejected() {
        let err = parse_single(&[("TEAM", serde_json::json!(300))]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownSide(300)));
    }

    #[test]
    fn unknown_position_code_rejected() {
        let err = parse_single(&[("PLAYER_POSITION", serde_json::json!(9))]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownLane(9)));
    }

    #[test]
    fn missing_field_aborts_the_parse() {
        let mut record = record(&[]);
        record.as_object_mut().unwrap().remove("NUM_DEATHS");
        let stats = serde_json::json!([record]).to_string();
        let err = parse_players(&stats).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Stats(_)));
    }

    #[test]
    fn negative_counter_rejected() {
        let err = parse_single(&[("NUM_DEATHS", serde_json::json!(-1))]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Stats(_)));
    }

    #[test]
    fn non_numeric_counter_string_rejected() {
        let err = parse_single(&[("LEVEL", serde_json::json!("sixteen"))]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Stats(_)));
    }
}
