//! Reported state of a host entity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// State a host reports for an entity.
///
/// Hosts use an open vocabulary; everything outside the states the engine
/// reasons about collapses into [`EntityState::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    On,
    Off,
    Open,
    Closed,
    Unavailable,
    Unknown,
}

impl EntityState {
    /// Lenient parse of a raw host state string.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "on" => Self::On,
            "off" => Self::Off,
            "open" => Self::Open,
            "closed" => Self::Closed,
            "unavailable" => Self::Unavailable,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Unavailable => "unavailable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EntityState {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}
