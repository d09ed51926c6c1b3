//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`NightwatchError`] via `#[from]`; adapters wrap their IO errors behind
//! [`NightwatchError::Storage`] so the domain stays free of IO types.

use thiserror::Error;

/// Top-level error for nightwatch operations.
#[derive(Debug, Error)]
pub enum NightwatchError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced entity or group does not exist on the host.
    #[error("unknown entity")]
    UnknownEntity(#[from] UnknownEntityError),

    /// The settings snapshot could not be read or written.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Entity ids must be `domain.object` qualified names.
    #[error("entity id {0:?} is not a dot-qualified `domain.object` name")]
    MalformedEntityId(String),

    /// A time-of-day string did not parse.
    #[error("{0:?} is not a valid HH:MM:SS time of day")]
    MalformedTime(String),

    /// An hour component outside `0..=23`.
    #[error("hour {0} is out of range (0..=23)")]
    HourOutOfRange(i64),

    /// A minute component outside `0..=59`.
    #[error("minute {0} is out of range (0..=59)")]
    MinuteOutOfRange(i64),

    /// A second component outside `0..=59`.
    #[error("second {0} is out of range (0..=59)")]
    SecondOutOfRange(i64),

    /// The shutoff timeout must be strictly positive.
    #[error("shutoff timeout must be greater than zero")]
    ZeroTimeout,

    /// A slider entity that is none of the five settings controls.
    #[error("{0:?} does not name a known settings slider")]
    UnknownSlider(String),
}

/// A referenced entity is unknown to the host runtime.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("entity {id} does not exist on the host")]
pub struct UnknownEntityError {
    /// The entity id that failed to resolve.
    pub id: String,
}
