//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the engine and the adapter
//! layer can depend on them without creating circular dependencies.

pub mod commands;
pub mod notify;
pub mod panel;
pub mod states;
pub mod storage;
pub mod timers;

pub use commands::DeviceCommands;
pub use notify::Announcer;
pub use panel::ControlPanel;
pub use states::StateProvider;
pub use storage::SettingsRepository;
pub use timers::{TimerFire, TimerHost};
