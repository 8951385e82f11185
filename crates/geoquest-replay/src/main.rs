//! Scenario replay binary for the GeoQuest task engine.
//!
//! Drives a [`GameSession`](geoquest_engine::GameSession) from a scripted
//! JSON scenario and prints the final score, projection, and warnings as
//! JSON on stdout. Logs go to stderr.
//!
//! ```bash
//! geoquest-replay scenarios/campus-hunt.json
//! ```
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `GEOQUEST_CONFIG` or `geoquest-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Read and parse the scenario file
//! 4. Replay every event through a game session
//! 5. Print the report

mod error;
mod scenario;

use std::path::PathBuf;

use geoquest_engine::EngineConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ReplayError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "geoquest-config.yaml";

/// Application entry point for the replay binary.
///
/// # Errors
///
/// Returns an error if the configuration or scenario cannot be loaded.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration before logging so the configured level applies.
    let config = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!(
        editor_mode = config.session.editor_mode,
        require_reachable = config.session.require_reachable,
        max_accuracy_m = ?config.activation.max_accuracy_m,
        "Configuration loaded"
    );

    // 3. Read the scenario.
    let path = scenario_path()?;
    let json = std::fs::read_to_string(&path).map_err(ReplayError::from)?;
    let scenario = scenario::parse(&json)?;
    info!(path = %path.display(), "Scenario read");

    // 4. Replay.
    let report = scenario::replay(scenario, &config)?;

    // 5. Print.
    let rendered = serde_json::to_string_pretty(&report).map_err(ReplayError::from)?;
    println!("{rendered}");
    Ok(())
}

/// Load engine configuration.
///
/// Uses the file named by `GEOQUEST_CONFIG` if set, otherwise
/// `geoquest-config.yaml` if it exists, otherwise defaults. Environment
/// overrides apply in every case.
fn load_config() -> Result<EngineConfig, ReplayError> {
    let config_path = std::env::var_os("GEOQUEST_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if config_path.exists() {
        Ok(EngineConfig::from_file(&config_path)?)
    } else {
        let mut config = EngineConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

/// The scenario path: the single positional argument.
fn scenario_path() -> Result<PathBuf, ReplayError> {
    let mut args = std::env::args_os().skip(1);
    match (args.next(), args.next()) {
        (Some(path), None) => Ok(PathBuf::from(path)),
        _ => Err(ReplayError::Usage),
    }
}
