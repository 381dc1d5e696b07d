// Module exports for CLI subcommands
//
// Each module handles a group of related subcommands. main.rs parses the
// arguments, loads the engine once and dispatches to these handlers.

pub mod hubs;
pub mod network;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};

use flightnet_lib::{resolve_data_dir, EngineConfig, FlightEngine};

/// Resolve configuration and dataset location, then build the engine.
///
/// Configuration comes from the defaults, then `config_path` when given,
/// then `FLIGHTNET_*` environment overrides.
pub fn load_engine(data_dir: Option<&Path>, config_path: Option<&Path>) -> Result<FlightEngine> {
    let config = match config_path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let config = config
        .with_env_overrides()
        .context("invalid FLIGHTNET_* environment override")?;

    let dir = resolve_data_dir(data_dir);
    FlightEngine::load(&dir, config)
        .with_context(|| format!("failed to load flight data from {}", dir.display()))
}
