//! # nightwatchd — nightwatch daemon
//!
//! Composition root that wires the shutoff engine to its adapters and runs
//! the message loop.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Install the `tracing` subscriber
//! - Build the simulated home and flatten the watch root into a watchlist
//! - Construct the engine components, injecting adapters via port traits
//! - Run the engine until the shutdown signal arrives
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::mpsc;

use nightwatch_adapter_storage_file::FileSettingsRepository;
use nightwatch_adapter_virtual::VirtualHome;
use nightwatch_app::daylight::DaylightSwitcher;
use nightwatch_app::flatten::flatten;
use nightwatch_app::router::EventRouter;
use nightwatch_app::runtime::{Engine, EngineMessage, channel};
use nightwatch_app::scheduler::ShutoffScheduler;
use nightwatch_app::settings::SettingsService;
use nightwatch_app::timers::TokioTimers;
use nightwatch_domain::entity::EntityState;
use nightwatch_domain::id::EntityId;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    tracing::info!(
        root = %config.watch.root,
        snapshot = %config.storage.path,
        "nightwatchd starting"
    );

    let (sender, receiver) = channel();
    let home = Arc::new(demo_home(sender.clone(), &config)?);

    let watchlist = flatten(&home, &config.watch_root()?, &config.category_filter()).await?;
    tracing::info!(entities = watchlist.len(), "watchlist flattened");

    let settings = SettingsService::load(FileSettingsRepository::new(&config.storage.path)).await;

    let scheduler = ShutoffScheduler::new(
        Arc::clone(&home),
        Arc::clone(&home),
        TokioTimers::new(sender),
        Arc::clone(&home),
        watchlist,
    );
    let daylight = DaylightSwitcher::new(Arc::clone(&home), Arc::clone(&home), config.follow_sun()?);
    let router = EventRouter::new(scheduler, daylight, settings, Arc::clone(&home));
    let engine = Engine::new(router, receiver);

    tokio::select! {
        () = engine.run() => {
            tracing::warn!("engine inbox closed, exiting");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received, exiting");
        }
    }

    Ok(())
}

/// Build the simulated household the daemon runs against.
///
/// The watch root resolves to a small mixed group (lights, a switch, a
/// garage cover and a nested group), plus the configured follow-sun
/// entities.
fn demo_home(
    events: mpsc::UnboundedSender<EngineMessage>,
    config: &Config,
) -> Result<VirtualHome, Box<dyn std::error::Error>> {
    let kitchen = EntityId::new("light.kitchen")?;
    let porch = EntityId::new("light.porch")?;
    let landing = EntityId::new("light.landing")?;
    let fountain = EntityId::new("switch.fountain")?;
    let garage = EntityId::new("cover.garage")?;
    let upstairs = EntityId::new("group.upstairs")?;

    let mut home = VirtualHome::new(events)
        .with_entity(kitchen.clone(), EntityState::Off)
        .with_entity(porch.clone(), EntityState::Off)
        .with_entity(landing.clone(), EntityState::Off)
        .with_entity(fountain.clone(), EntityState::Off)
        .with_entity(garage.clone(), EntityState::Closed)
        .with_group(upstairs.clone(), vec![landing])
        .with_group(
            config.watch_root()?,
            vec![kitchen, porch, fountain, garage, upstairs],
        );

    for id in config.follow_sun()? {
        home = home.with_entity(id, EntityState::Off);
    }

    Ok(home)
}
