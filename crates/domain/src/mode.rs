//! House mode — the host-wide mode selector gating automations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The host's current house mode.
///
/// Shutoff scheduling only runs in [`HouseMode::Normal`]; any other mode
/// (guests, party, vacation) suspends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HouseMode {
    Normal,
    Other(String),
}

impl HouseMode {
    /// Interpret a raw host mode name. The comparison is case sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name == "Normal" {
            Self::Normal
        } else {
            Self::Other(name.to_string())
        }
    }

    #[must_use]
    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "Normal",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for HouseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for HouseMode {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<HouseMode> for String {
    fn from(value: HouseMode) -> Self {
        value.as_str().to_string()
    }
}
