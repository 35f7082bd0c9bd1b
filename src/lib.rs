/*!

A parser for League of Legends replay containers (`.rofl` files).

A replay container records one completed match. Most of it is an opaque
binary stream, but the head of the file embeds a JSON document with the
match result: game length, recording client version, and a nested document
of per-player statistics. This crate extracts that document and exposes it
as a typed, immutable model of players, teams, and statistics.

## Quick Start

```rust
use rofl::{ReplayParser, Outcome, Side};

# fn record(name: &str, team: u32, win: &str) -> serde_json::Value {
#     serde_json::json!({
#         "NAME": name, "ID": 101, "SKIN": "Jinx", "LEVEL": 16, "TEAM": team,
#         "WIN": win, "KEYSTONE_ID": 8005, "CHAMPIONS_KILLED": 5, "ASSISTS": 3,
#         "NUM_DEATHS": 2, "PLAYER_POSITION": 4, "MINIONS_KILLED": 10,
#         "NEUTRAL_MINIONS_KILLED": 5, "NEUTRAL_MINIONS_KILLED_YOUR_JUNGLE": 3,
#         "NEUTRAL_MINIONS_KILLED_ENEMY_JUNGLE": 2, "ITEM0": 1055, "ITEM1": 3006,
#         "ITEM2": 3031, "ITEM3": 3363, "ITEM4": 3046, "ITEM5": 3072, "ITEM6": 0,
#         "SUMMON_SPELL1_CAST": 7, "SUMMON_SPELL2_CAST": 4
#     })
# }
# let stats = serde_json::json!([record("Alice", 100, "Win"), record("Bob", 200, "Fail")]).to_string();
# let container = format!(
#     r#"RIOT-HEADER{{"gameLength":1795231.0,"gameVersion":"9.1.1.3446","statsJson":{}}}BINARY-TAIL"#,
#     serde_json::Value::String(stats),
# );
// a .rofl container read into memory
let data: &[u8] = container.as_bytes();

let replay = ReplayParser::new().parse_slice(data)?;

assert_eq!(replay.players().len(), 2);
assert_eq!(replay.game_version().major(), 9);
assert_eq!(replay.winning_team().side(), Side::Purple);
assert_eq!(replay.blue_team().outcome(), Outcome::Defeat);
# Ok::<(), rofl::Error>(())
```

For replays on disk, [`Replay::parse`] validates the path (existence and the
`rofl` extension) before reading:

```rust,no_run
use rofl::Replay;

let replay = Replay::parse("2023-01-15_match.rofl")?;
println!("game took {:?}", replay.game_length());
# Ok::<(), rofl::Error>(())
```

## How parsing works

The container is only partially text, so parsing never decodes the whole
file. The stages, each with a narrow contract:

```text
raw bytes   ── bounded head read (default: first 20 lines)
head text   ── locate the payload between the literal markers
payload     ── decode the envelope (gameLength, gameVersion, statsJson)
statsJson   ── decode the nested per-player records (double encoded JSON)
players     ── group by side into the purple and blue teams
```

Any failure aborts the parse of that file; a partially populated
[`Replay`] is never returned. Errors carry the file path and the underlying
decode fault as their [source](std::error::Error::source).

## Encodings

The head of the file is decoded with a caller-selected [`Encoding`]
(defaulting to windows1252). Player names written before the payload can
contain multi-byte sequences, so the encoding affects where the payload
markers are found and is part of the public contract.

## Version compatibility

A replay records the client version that produced it. Whether an installed
client can play it back is a three-valued answer, as the installed version
may simply be unknown:

```rust
use rofl::GameVersion;

let installed: GameVersion = "9.2.1".parse()?;
assert!("9.1.1".parse::<GameVersion>()? <= installed);
# Ok::<(), rofl::Error>(())
```

*/

mod encoding;
mod envelope;
mod errors;
mod payload;
mod replay;
mod stats;
mod team;
mod version;

pub use self::encoding::{Encoding, Utf8Encoding, Windows1252Encoding};
pub use self::errors::{Error, ErrorKind};
pub use self::payload::DEFAULT_SCAN_LINES;
pub use self::replay::{Playability, Replay, ReplayFile, ReplayParser};
pub use self::stats::{Inventory, Kda, Lane, Outcome, Player, Side};
pub use self::team::Team;
pub use self::version::GameVersion;
