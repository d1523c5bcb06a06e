//! Query chain demo binary.
//!
//! Spawns a creature, runs the command chain over its stats, then attaches
//! and disposes query modifiers one at a time, printing the creature after
//! each step.
//!
//! ```bash
//! OUTPUT_FORMAT=json RUST_LOG=trace cargo run -p broker-chain-cli
//! ```
mod config;
mod logging;
mod scenario;

use anyhow::Result;
use config::CliConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!(
        creature = %config.creature.name,
        output = %config.output,
        "Starting walkthrough"
    );

    let steps = scenario::run(&config)?;
    scenario::render(&steps, config.output, &mut std::io::stdout().lock())?;

    tracing::info!(steps = steps.len(), "Walkthrough complete");
    Ok(())
}
