//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components and report with `anyhow`.

pub mod inspect;
pub mod models;
pub mod step;
pub mod utils;

// Re-export main command functions
pub use inspect::{execute_inspect, execute_validate, validate_args};
pub use models::{InspectArgs, StepArgs};
pub use step::execute_step;
pub use utils::{display_version, load_session};
