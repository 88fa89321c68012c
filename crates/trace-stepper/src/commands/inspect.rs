//! Inspect and validate commands.
//!
//! The inspect command:
//! 1. Reads and parses the raw trace
//! 2. Normalizes it into canonical steps
//! 3. Writes the canonical trace document

use super::models::InspectArgs;
use super::utils::load_session;
use crate::output::{to_document, write_document};
use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::time::Instant;

/// Execute the inspect command
///
/// **Public** - main entry point called from the CLI
///
/// # Errors
/// * Unreadable or malformed trace files
/// * Normalization failures
/// * File write errors
pub fn execute_inspect(args: InspectArgs) -> Result<()> {
    let start_time = Instant::now();

    let session = load_session(&args.trace, args.config.as_deref())?;

    let document = to_document(&session);
    write_document(&document, &args.output).context("Failed to write canonical trace")?;
    info!("✓ Canonical trace written to: {}", args.output.display());

    info!(
        "Inspect completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Normalize a trace and report what it contains
pub fn execute_validate(trace: &Path, config: Option<&Path>) -> Result<()> {
    println!("Validating trace: {}", trace.display());

    let session = load_session(trace, config)?;
    let heap_objects = session
        .steps()
        .last()
        .map(|step| step.heap.len())
        .unwrap_or(0);
    let max_depth = session
        .steps()
        .iter()
        .map(|step| step.stack_to_render.len())
        .max()
        .unwrap_or(0);

    println!("✓ Valid trace");
    println!("  Steps: {}", session.total_steps());
    println!("  Heap objects: {}", heap_objects);
    println!("  Max stack depth: {}", max_depth);

    Ok(())
}

/// Validate inspect arguments
///
/// **Public** - can be called before execute_inspect for early validation
pub fn validate_args(args: &InspectArgs) -> Result<()> {
    if args.trace.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.trace == args.output {
        anyhow::bail!("Output path must differ from the trace path");
    }

    Ok(())
}
