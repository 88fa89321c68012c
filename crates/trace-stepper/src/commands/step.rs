//! Step command: show one step of a trace in the terminal.

use super::models::StepArgs;
use super::utils::load_session;
use crate::output::render_step_summary;
use anyhow::Result;
use log::debug;

/// Execute the step command
pub fn execute_step(args: StepArgs) -> Result<()> {
    let mut session = load_session(&args.trace, args.config.as_deref())?;

    let landed = session.navigator_mut().go_to(args.index);
    if i64::try_from(landed).ok() != Some(args.index) {
        debug!("Requested step {} clamped to {}", args.index, landed);
    }

    println!("{}", render_step_summary(&session));
    Ok(())
}
