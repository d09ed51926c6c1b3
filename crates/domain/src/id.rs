//! Entity identifier — a validated, device-type-qualified name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A host entity identifier of the form `domain.object`, e.g.
/// `light.kitchen` or `group.night_shutoff`.
///
/// The part before the first dot is the device-type domain; the rest names
/// the concrete object. Both halves must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Validate and wrap a qualified entity name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedEntityId`] when the dot or either
    /// half is missing.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        match raw.split_once('.') {
            Some((domain, object)) if !domain.is_empty() && !object.is_empty() => Ok(Self(raw)),
            _ => Err(ValidationError::MalformedEntityId(raw)),
        }
    }

    /// Join two known-good halves. Callers must pass non-empty parts.
    pub(crate) fn join(domain: &str, object_id: &str) -> Self {
        Self(format!("{domain}.{object_id}"))
    }

    /// The device-type prefix (`light` in `light.kitchen`).
    #[must_use]
    pub fn domain(&self) -> &str {
        match self.0.split_once('.') {
            Some((domain, _)) => domain,
            None => &self.0,
        }
    }

    /// The object name after the prefix (`kitchen` in `light.kitchen`).
    #[must_use]
    pub fn object_id(&self) -> &str {
        match self.0.split_once('.') {
            Some((_, object)) => object,
            None => &self.0,
        }
    }

    /// The full qualified name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}
