//! Human-facing status of the step being viewed.

use crate::normalizer::CanonicalStep;
use crate::parser::EventKind;
use std::fmt;

const UNKNOWN_ERROR: &str = "Unknown error";
const ANONYMOUS: &str = "anonymous";

/// What the program is doing at the current step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    NoData,
    Executing { line: u32 },
    Calling { function: String },
    Returning { function: String },
    Exception { message: String },
    /// Final step reached without an exception
    Completed,
}

impl ExecutionStatus {
    /// Derive the status for `step`; `is_last` marks the final step of the trace
    pub fn for_step(step: Option<&CanonicalStep>, is_last: bool) -> Self {
        let Some(step) = step else {
            return ExecutionStatus::NoData;
        };

        match step.event {
            EventKind::Exception => ExecutionStatus::Exception {
                message: step
                    .exception_msg
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            },
            _ if is_last => ExecutionStatus::Completed,
            EventKind::Step => ExecutionStatus::Executing { line: step.line },
            EventKind::Call => ExecutionStatus::Calling {
                function: display_name(&step.func_name),
            },
            EventKind::Return => ExecutionStatus::Returning {
                function: display_name(&step.func_name),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExecutionStatus::Exception { .. } | ExecutionStatus::NoData)
    }
}

fn display_name(func_name: &str) -> String {
    if func_name.is_empty() {
        ANONYMOUS.to_string()
    } else {
        func_name.to_string()
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStatus::NoData => write!(f, "No execution data available"),
            ExecutionStatus::Executing { line } => write!(f, "Executing line {}", line),
            ExecutionStatus::Calling { function } => write!(f, "Calling function: {}", function),
            ExecutionStatus::Returning { function } => {
                write!(f, "Returning from function: {}", function)
            }
            ExecutionStatus::Exception { message } => write!(f, "Exception: {}", message),
            ExecutionStatus::Completed => write!(f, "Program execution completed successfully"),
        }
    }
}
