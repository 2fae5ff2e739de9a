//! Generates one racetrack and writes it to disk.
//!
//! Run with:
//! ```
//! TRACKGEN_SEED=42 cargo run -p trackgen --bin trackgen
//! ```
//!
//! Environment:
//! - `TRACKGEN_CONFIG`: JSON config file (optional, defaults otherwise)
//! - `TRACKGEN_SEED`: fixed seed, overrides the config and disables randomize
//! - `TRACKGEN_OUT`: output directory (default `./track-out`)

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use trackgen::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = match std::env::var("TRACKGEN_CONFIG") {
        Ok(path) => TrackConfig::from_json_path(&path)
            .with_context(|| format!("loading config from {path}"))?,
        Err(_) => TrackConfig::default(),
    };

    if let Ok(seed) = std::env::var("TRACKGEN_SEED") {
        config.seed = seed
            .parse()
            .with_context(|| format!("TRACKGEN_SEED is not a valid seed: {seed}"))?;
        config.randomize = false;
    }

    let out_dir = std::env::var("TRACKGEN_OUT").unwrap_or_else(|_| "./track-out".to_string());

    let track = TrackBuilder::from_config(config).with_metrics(true).build()?;

    if let Some(metrics) = &track.metrics {
        tracing::info!(
            "Generated in {} ms (plan {} ms, walk {} ms, mesh {} ms)",
            metrics.plan_time_ms + metrics.walk_time_ms + metrics.mesh_time_ms,
            metrics.plan_time_ms,
            metrics.walk_time_ms,
            metrics.mesh_time_ms
        );
    }
    for line in TrackSummary::from_track(&track).to_string().lines() {
        tracing::info!("{line}");
    }

    if track.mesh.is_empty() {
        tracing::warn!("Track is degenerate, mesh is empty");
    }

    write_track_files(&track, &out_dir)?;
    Ok(())
}
