use crate::encoding::{Encoding, Windows1252Encoding};
use crate::envelope::Envelope;
use crate::errors::{Error, ErrorKind};
use crate::payload;
use crate::stats::{self, Outcome, Player, Side};
use crate::team::Team;
use crate::version::GameVersion;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A validated handle to a replay container on disk
///
/// Construction verifies the path points at an existing file with the `rofl`
/// extension; nothing is read until the file is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFile {
    path: PathBuf,
}

impl ReplayFile {
    /// Validates the given path as a replay container
    pub fn new<P: AsRef<Path>>(path: P) -> Result<ReplayFile, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::new(ErrorKind::FileNotFound).with_path(path));
        }

        if path.extension() != Some(OsStr::new("rofl")) {
            return Err(Error::new(ErrorKind::WrongExtension).with_path(path));
        }

        Ok(ReplayFile {
            path: path.to_path_buf(),
        })
    }

    /// Path to the replay container
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Whether a replay can be played back by an installed client
///
/// Deliberately three-valued: an unknown client version is not the same
/// statement as an incompatible one, and callers should not conflate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playability {
    /// The replay's version is not newer than the installed client
    Compatible,

    /// The replay was recorded by a newer client than the one installed
    Incompatible,

    /// No installed client version was supplied
    Unknown,
}

/// A configurable replay parser
///
/// The defaults match how the client writes replays: windows1252 text and a
/// payload within the first 20 lines. Both can be adjusted for unusual
/// containers.
///
/// ```no_run
/// use rofl::{ReplayParser, Utf8Encoding};
///
/// let replay = ReplayParser::new()
///     .with_encoding(Utf8Encoding::new())
///     .max_scan_lines(40)
///     .parse_file("match.rofl")?;
/// # Ok::<(), rofl::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReplayParser<E> {
    encoding: E,
    max_scan_lines: usize,
}

impl ReplayParser<Windows1252Encoding> {
    /// Creates a parser with the default encoding and scan bound
    pub fn new() -> Self {
        ReplayParser {
            encoding: Windows1252Encoding::new(),
            max_scan_lines: payload::DEFAULT_SCAN_LINES,
        }
    }
}

impl Default for ReplayParser<Windows1252Encoding> {
    fn default() -> Self {
        ReplayParser::new()
    }
}

impl<E> ReplayParser<E>
where
    E: Encoding,
{
    /// Sets the encoding used to decode the head of the file
    pub fn with_encoding<E2: Encoding>(self, encoding: E2) -> ReplayParser<E2> {
        ReplayParser {
            encoding,
            max_scan_lines: self.max_scan_lines,
        }
    }

    /// Sets how many lines of the container are scanned for the payload
    ///
    /// The payload occurs early in the file and the binary tail can be
    /// large, so the scan is bounded rather than exhaustive.
    pub fn max_scan_lines(mut self, lines: usize) -> Self {
        self.max_scan_lines = lines;
        self
    }

    /// Validates and parses the replay at the given path
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Replay, Error> {
        let file = ReplayFile::new(path)?;
        self.parse_replay(&file)
    }

    /// Parses an already validated replay file
    ///
    /// Any error is surfaced with the file's path attached.
    pub fn parse_replay(&self, replay: &ReplayFile) -> Result<Replay, Error> {
        self.open_and_parse(replay.path())
            .map_err(|e| e.with_path(replay.path()))
    }

    /// Parses a replay container from an in-memory buffer
    ///
    /// The same scan bound applies as when reading from disk.
    pub fn parse_slice(&self, data: &[u8]) -> Result<Replay, Error> {
        let head = payload::head_text(data, self.max_scan_lines, &self.encoding)?;
        self.parse_head(&head)
    }

    fn open_and_parse(&self, path: &Path) -> Result<Replay, Error> {
        let reader = BufReader::new(File::open(path)?);
        let head = payload::head_text(reader, self.max_scan_lines, &self.encoding)?;
        // the file handle is released here on success and failure alike
        self.parse_head(&head)
    }

    fn parse_head(&self, head: &str) -> Result<Replay, Error> {
        let envelope = Envelope::from_payload(payload::locate(head)?)?;
        let players = stats::parse_players(&envelope.stats_json)?;
        let purple_team = Team::assemble(Side::Purple, &players)?;
        let blue_team = Team::assemble(Side::Blue, &players)?;

        Ok(Replay {
            game_length: envelope.game_length,
            game_version: envelope.game_version,
            purple_team,
            blue_team,
            players,
        })
    }
}

/// The parsed outcome of one replay container
///
/// Immutable once parsed; a new parse produces a wholly new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    game_length: Duration,
    game_version: GameVersion,
    purple_team: Team,
    blue_team: Team,
    players: Vec<Player>,
}

impl Replay {
    /// Parses the replay at the given path with default settings
    ///
    /// Use [`ReplayParser`] to customize the encoding or scan bound.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Replay, Error> {
        ReplayParser::new().parse_file(path)
    }

    /// How long the game lasted
    pub fn game_length(&self) -> Duration {
        self.game_length
    }

    /// The client version that recorded the game
    pub fn game_version(&self) -> &GameVersion {
        &self.game_version
    }

    /// The team that fought on the purple side
    pub fn purple_team(&self) -> &Team {
        &self.purple_team
    }

    /// The team that fought on the blue side
    pub fn blue_team(&self) -> &Team {
        &self.blue_team
    }

    /// All players of the match, in payload order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The team that won the game
    pub fn winning_team(&self) -> &Team {
        if self.purple_team.outcome() == Outcome::Victory {
            &self.purple_team
        } else {
            &self.blue_team
        }
    }

    /// The team that lost the game
    ///
    /// Always the opposite team of [`Replay::winning_team`].
    pub fn losing_team(&self) -> &Team {
        if self.purple_team.outcome() == Outcome::Victory {
            &self.blue_team
        } else {
            &self.purple_team
        }
    }

    /// Whether this replay can be played back under the given installed
    /// client version
    ///
    /// Replays recorded by an older or equal client are assumed playable.
    /// Without a known installed version the answer is
    /// [`Playability::Unknown`], never a boolean.
    pub fn can_be_played(&self, installed: Option<&GameVersion>) -> Playability {
        match installed {
            None => Playability::Unknown,
            Some(installed) if self.game_version <= *installed => Playability::Compatible,
            Some(_) => Playability::Incompatible,
        }
    }
}
