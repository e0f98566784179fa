//! # Mote Harness
//!
//! Headless driver for the collider pool. Runs a particle fountain at a fixed
//! 50 Hz tick, keeps a collider pool in step with it and logs what the pool
//! does.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod fountain;

use anyhow::Result;
use glam::{Affine3A, Vec2, Vec3};
use mote_common::{LayerMask, MoteResult};
use mote_pool::{ColliderConfig, ColliderPoolManager};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::fountain::{Fountain, FountainSettings};

/// Configuration file read when no path is given.
const CONFIG_FILE: &str = "mote.toml";

/// Fixed step length in seconds.
const STEP_SECONDS: f32 = 0.02;

/// Steps to simulate.
const TOTAL_STEPS: u64 = 500;

/// Log a pool report every this many steps.
const REPORT_EVERY: u64 = 50;

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("mote=info".parse()?))
        .init();

    info!("Mote harness starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // An explicit path must load; the default file is optional
    let config = match std::env::args().nth(1) {
        Some(path) => ColliderConfig::try_load_from(&path)?,
        None => ColliderConfig::load_from(CONFIG_FILE),
    };

    run(config)?;

    info!("Mote harness exiting");
    Ok(())
}

fn run(config: ColliderConfig) -> MoteResult<()> {
    let emitter = Affine3A::from_translation(Vec3::new(0.0, 1.0, 0.0));
    let mut fountain = Fountain::new(FountainSettings::default(), emitter, 0x5EED);

    let mut manager = ColliderPoolManager::new(config);
    manager.start(Some(&fountain))?;
    let query_mask = LayerMask::NONE.with(manager.config().layer());

    for step in 1..=TOTAL_STEPS {
        fountain.step(STEP_SECONDS);
        let report = manager.fixed_update(&fountain)?;

        if step % REPORT_EVERY == 0 {
            let near_emitter = manager
                .pool()
                .overlapping(Vec2::new(0.0, 1.0), 1.0, query_mask)
                .count();
            info!(
                "Step {step}: {} particles live, {} colliders active, {} pooled, {near_emitter} near emitter",
                fountain.live_count(),
                report.active,
                report.pool_len
            );
        }

        if step == TOTAL_STEPS / 2 {
            if let Some(handle) = manager.pool().handle_at(0) {
                manager.destroy_proxy(handle)?;
                info!(
                    "Destroyed {handle} externally, pool now holds {}",
                    manager.pool().len()
                );
            }
        }
    }

    let destroyed = manager.shutdown();
    info!("Shut down after {TOTAL_STEPS} steps, released {destroyed} colliders");
    Ok(())
}
