//! Sun position as reported by the host.

use serde::{Deserialize, Serialize};

/// Whether the sun is currently up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunPosition {
    AboveHorizon,
    BelowHorizon,
}

impl SunPosition {
    #[must_use]
    pub fn is_below_horizon(&self) -> bool {
        matches!(self, Self::BelowHorizon)
    }
}
