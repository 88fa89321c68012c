//! Step navigation over a normalized trace.
//!
//! The canonical steps are built once; afterwards the only mutable state
//! is the navigator's position.

pub mod session;
pub mod status;
pub mod stepper;

// Re-export main types
pub use session::Session;
pub use status::ExecutionStatus;
pub use stepper::StepNavigator;
