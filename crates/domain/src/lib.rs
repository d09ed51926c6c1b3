//! # nightwatch-domain
//!
//! Pure domain model for the nightwatch auto-shutoff engine.
//!
//! ## Responsibilities
//! - Foundational types: validated entity identifiers, error conventions,
//!   timestamps and times-of-day
//! - Define **Entities** (qualified names with a typed category) and their
//!   observable **states**
//! - Define the **TimeoutConfig** (morning/night boundaries + shutoff delay)
//!   and the night-window interval math
//! - Define **Commands** (turn on/off, close cover), **HostEvents**
//!   (state changes, slider edits, sun events) and **Notifications**
//! - Define the **slider controls** that edit the configuration
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod command;
pub mod entity;
pub mod event;
pub mod mode;
pub mod settings;
pub mod slider;
pub mod sun;
pub mod timer;
