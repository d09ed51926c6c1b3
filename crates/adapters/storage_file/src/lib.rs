//! # nightwatch-adapter-storage-file
//!
//! JSON file persistence for the shutoff settings, using `tokio::fs`.
//!
//! ## Snapshot format
//!
//! The settings live in a single flat JSON object so the file stays easy to
//! inspect and edit by hand:
//!
//! ```json
//! {
//!   "morning": "03:50:00",
//!   "nighttime": "23:00:00",
//!   "timeout": "300"
//! }
//! ```
//!
//! Times are `HH:MM:SS` strings and the timeout is a decimal string holding
//! whole seconds.
//!
//! ## Dependency rule
//!
//! Depends on `nightwatch-app` (for the port trait) and `nightwatch-domain`
//! (for domain types). The `app` and `domain` crates must never reference
//! this adapter.

pub mod error;
pub mod settings_repo;

pub use error::StorageError;
pub use settings_repo::FileSettingsRepository;
