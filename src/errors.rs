use crate::stats::Side;
use std::fmt;
use std::path::{Path, PathBuf};

/// An error that can occur when processing a replay file
#[derive(Debug)]
pub struct Error(Box<ErrorInner>);

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    path: Option<PathBuf>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(ErrorInner { kind, path: None }))
    }

    /// Attaches the replay file path to the error, if one isn't already set
    pub(crate) fn with_path<P: AsRef<Path>>(mut self, path: P) -> Error {
        if self.0.path.is_none() {
            self.0.path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0.kind
    }

    /// Returns the replay file that the error occurred in (if available)
    pub fn path(&self) -> Option<&Path> {
        self.0.path.as_deref()
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// An io error while reading the replay file
    Io(std::io::Error),

    /// The given path does not point at an existing file
    FileNotFound,

    /// The given path does not carry the `.rofl` extension
    WrongExtension,

    /// The embedded payload markers were not found in the scanned head of the file
    PayloadBoundary,

    /// The payload envelope was not valid JSON or missed a required field
    Envelope(serde_json::Error),

    /// The nested stats document was not valid JSON or a record missed a required field
    Stats(serde_json::Error),

    /// The recorded game version was not a dotted numeric version
    InvalidVersion(String),

    /// The recorded game length was negative or not finite
    InvalidGameLength(f64),

    /// A player record carried an unrecognized team code
    UnknownSide(u64),

    /// A player record carried an unrecognized position code
    UnknownLane(u64),

    /// No player in the payload belonged to the given side
    EmptyTeam(Side),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.0.kind {
            ErrorKind::Io(ref err) => Some(err),
            ErrorKind::Envelope(ref err) => Some(err),
            ErrorKind::Stats(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.kind {
            ErrorKind::Io(ref err) => write!(f, "io error: {}", err)?,
            ErrorKind::FileNotFound => write!(f, "replay file not found")?,
            ErrorKind::WrongExtension => {
                write!(f, "replay files are expected to carry a rofl extension")?
            }
            ErrorKind::PayloadBoundary => {
                write!(f, "unable to find the payload boundary markers")?
            }
            ErrorKind::Envelope(ref err) => {
                write!(f, "unable to parse the replay payload: {}", err)?
            }
            ErrorKind::Stats(ref err) => {
                write!(f, "unable to parse the embedded player stats: {}", err)?
            }
            ErrorKind::InvalidVersion(ref raw) => {
                write!(f, "unable to parse game version: {}", raw)?
            }
            ErrorKind::InvalidGameLength(ms) => {
                write!(f, "game length out of range: {}ms", ms)?
            }
            ErrorKind::UnknownSide(code) => write!(f, "unknown team code: {}", code)?,
            ErrorKind::UnknownLane(code) => write!(f, "unknown position code: {}", code)?,
            ErrorKind::EmptyTeam(side) => write!(f, "no players found on the {} side", side)?,
        }

        if let Some(path) = self.path() {
            write!(f, " (replay: {})", path.display())?;
        }

        Ok(())
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(ErrorKind::Io(error))
    }
}
