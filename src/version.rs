//! Appliance versions and version-keyed lookup tables.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HarnessError;

/// A dotted appliance version such as `5.8.0.1`.
///
/// Versions compare component-wise with missing components treated as
/// zero, so `5.8 == 5.8.0`. [`Version::LOWEST`] sorts below every real
/// version.
#[derive(Debug, Clone, Eq)]
pub struct Version {
    parts: Vec<u32>,
    lowest: bool,
}

impl Version {
    pub const LOWEST: Version = Version {
        parts: Vec::new(),
        lowest: true,
    };

    pub fn new(parts: &[u32]) -> Self {
        Version {
            parts: parts.to_vec(),
            lowest: false,
        }
    }

    fn part(&self, i: usize) -> u32 {
        self.parts.get(i).copied().unwrap_or(0)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self.lowest, other.lowest) {
            (true, true) => return std::cmp::Ordering::Equal,
            (true, false) => return std::cmp::Ordering::Less,
            (false, true) => return std::cmp::Ordering::Greater,
            (false, false) => {}
        }
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.part(i).cmp(&other.part(i)))
            .find(|o| o.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("lowest") {
            return Ok(Version::LOWEST);
        }
        let parts = s
            .split('.')
            .map(|p| {
                p.parse::<u32>()
                    .map_err(|_| HarnessError::Config(format!("invalid version: {:?}", s)))
            })
            .collect::<Result<Vec<u32>, _>>()?;
        Ok(Version::new(&parts))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lowest {
            return write!(f, "lowest");
        }
        let parts: Vec<String> = self.parts.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A value chosen by appliance version: the entry with the greatest key
/// not above the current version wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionPick<T> {
    choices: BTreeMap<Version, T>,
}

impl<T> VersionPick<T> {
    pub fn new<I>(choices: I) -> Self
    where
        I: IntoIterator<Item = (Version, T)>,
    {
        VersionPick {
            choices: choices.into_iter().collect(),
        }
    }

    /// `None` only when every key is above `version`.
    pub fn pick(&self, version: &Version) -> Option<&T> {
        self.choices.range(..=version.clone()).next_back().map(|(_, v)| v)
    }
}
