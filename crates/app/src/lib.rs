//! # nightwatch-app
//!
//! Application layer for the nightwatch auto-shutoff engine.
//!
//! ## Responsibilities
//! - Define **ports** (traits) for everything the engine needs from the
//!   outside world: host state queries, device commands, one-shot timers,
//!   announcements, the settings panel, and settings persistence
//! - Implement the engine itself: group flattening, the per-entity shutoff
//!   scheduler, the settings service, the daylight switcher, and the event
//!   router that ties them together
//! - Run the single-consumer message loop that keeps handling sequential
//!
//! ## Dependency rule
//! Depends only on `nightwatch-domain` (and tokio for channels/timers).
//! Adapters depend on this crate, never the other way around.

pub mod daylight;
pub mod flatten;
pub mod ports;
pub mod router;
pub mod runtime;
pub mod scheduler;
pub mod settings;
pub mod timers;

#[cfg(test)]
pub(crate) mod testing;
