//! Helpers shared by commands.

use crate::navigator::Session;
use crate::parser::parse_trace_str;
use crate::utils::config::{load_config, NormalizerConfig, SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Read, parse and normalize a raw trace file into a session
pub fn load_session(trace_path: &Path, config_path: Option<&Path>) -> Result<Session> {
    let config = match config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => NormalizerConfig::default(),
    };
    debug!("Normalizer config: {:?}", config);

    info!("Reading raw trace: {}", trace_path.display());
    let contents = fs::read_to_string(trace_path)
        .with_context(|| format!("Failed to read trace file {}", trace_path.display()))?;

    let raw = parse_trace_str(&contents).context("Failed to parse raw trace")?;

    Session::open(&raw, config).context("Cannot visualize this trace")
}

/// Display version information
pub fn display_version() {
    println!("Trace Stepper v{}", env!("CARGO_PKG_VERSION"));
    println!("Canonical trace schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Step-through reconstruction of interpreter execution traces.");
}
