use crate::errors::{Error, ErrorKind};
use crate::version::GameVersion;
use serde::Deserialize;
use std::time::Duration;

/// The payload envelope as it appears on disk. Live files carry additional
/// fields (chunk ids, key frame counts) that parsing ignores.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "gameLength")]
    game_length: f64,
    #[serde(rename = "gameVersion")]
    game_version: String,
    #[serde(rename = "statsJson")]
    stats_json: String,
}

/// The decoded top level of the payload
///
/// The stats document is double encoded: `statsJson` is a JSON string whose
/// value is itself JSON text. The envelope hands that string on undecoded so
/// that the two decode stages keep independent contracts.
#[derive(Debug)]
pub(crate) struct Envelope {
    pub(crate) game_length: Duration,
    pub(crate) game_version: GameVersion,
    pub(crate) stats_json: String,
}

impl Envelope {
    pub(crate) fn from_payload(payload: &str) -> Result<Envelope, Error> {
        let raw: RawEnvelope =
            serde_json::from_str(payload).map_err(|e| Error::new(ErrorKind::Envelope(e)))?;

        if !raw.game_length.is_finite() || raw.game_length < 0.0 {
            return Err(Error::new(ErrorKind::InvalidGameLength(raw.game_length)));
        }

        Ok(Envelope {
            game_length: Duration::from_secs_f64(raw.game_length / 1000.0),
            game_version: raw.game_version.parse()?,
            stats_json: raw.stats_json,
        })
    }
}
