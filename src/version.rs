use crate::errors::{Error, ErrorKind};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A dotted numeric game version (eg: `9.1.1.3446`)
///
/// Components are compared numerically rather than lexically, so `9.10.1` is
/// newer than `9.9.9`. Missing trailing components are treated as zero, so
/// `9.1` and `9.1.0` compare equal.
///
/// ```
/// use rofl::GameVersion;
///
/// let old: GameVersion = "9.1.1".parse().unwrap();
/// let new: GameVersion = "9.10.1".parse().unwrap();
/// assert!(old < new);
/// assert_eq!(old.major(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct GameVersion {
    components: Vec<u32>,
}

impl GameVersion {
    /// The numeric components of the version, most significant first.
    ///
    /// Guaranteed non-empty.
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// Returns the first version component
    pub fn major(&self) -> u32 {
        self.components[0]
    }

    /// Returns the second version component, or zero when absent
    pub fn minor(&self) -> u32 {
        self.components.get(1).copied().unwrap_or(0)
    }

    /// Returns the third version component, or zero when absent
    pub fn patch(&self) -> u32 {
        self.components.get(2).copied().unwrap_or(0)
    }
}

impl FromStr for GameVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = s
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::new(ErrorKind::InvalidVersion(s.to_string())))?;

        // split always yields at least one part, so emptiness only occurs for
        // an empty input, which the numeric parse above already rejected
        Ok(GameVersion { components })
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i != 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

impl Ord for GameVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let lhs = self.components.get(i).copied().unwrap_or(0);
            let rhs = other.components.get(i).copied().unwrap_or(0);
            match lhs.cmp(&rhs) {
                Ordering::Equal => continue,
                order => return order,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for GameVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GameVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GameVersion {}
