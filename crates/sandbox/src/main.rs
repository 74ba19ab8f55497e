//! Combat sandbox entry point.
//!
//! Builds a feature configuration from settings and runs two scripted
//! encounters (a spear charge and a mace smash) against an in-memory world,
//! logging what happened.
//!
//! ```bash
//! RUST_LOG=combat=debug SANDBOX_TICKS=30 cargo run -p combat-sandbox
//! ```
mod config;
mod scenario;

use anyhow::{Context, Result};
use combat_runtime::{CombatSettings, FeatureKind, FeatureRegistry};
use config::SandboxConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SandboxConfig::from_env();

    let settings = match &config.settings_path {
        Some(path) => CombatSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => CombatSettings::default(),
    };
    tracing::info!(features = ?settings.features, tick_rate = settings.tick_rate, "settings loaded");

    let configuration = FeatureRegistry::vanilla()
        .configure(settings)
        .context("building feature configuration")?;

    if configuration.contains(FeatureKind::Spear) {
        scenario::spear_charge(&configuration, config.ticks);
    } else {
        tracing::info!("spear not selected, skipping charge");
    }

    if configuration.contains(FeatureKind::Mace) {
        for fall_distance in [1.0, 4.0, 9.0] {
            scenario::mace_smash(&configuration, fall_distance);
        }
    } else {
        tracing::info!("mace not selected, skipping smash");
    }

    Ok(())
}
