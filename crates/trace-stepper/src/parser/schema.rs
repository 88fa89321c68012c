//! Raw step and frame records emitted by the instrumented interpreter.
//!
//! Every field is optional on the wire; the normalizer fills in defaults.

use super::raw_value::Bindings;
use crate::heap::Heap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of interpreter event that produced a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    #[serde(alias = "step_line")]
    Step,
    Call,
    Return,
    Exception,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Step => "step",
            EventKind::Call => "call",
            EventKind::Return => "return",
            EventKind::Exception => "exception",
        };
        f.write_str(name)
    }
}

/// One interpreter-emitted record
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawStep {
    /// Current source line
    #[serde(default)]
    pub line: Option<u32>,

    /// Event kind (`step`, `call`, `return`, `exception`)
    #[serde(default)]
    pub event: Option<EventKind>,

    /// Currently executing function
    #[serde(default)]
    pub func_name: Option<String>,

    /// Module-level bindings
    #[serde(default)]
    pub globals: Option<Bindings>,

    /// Declared display order of the module-level bindings
    #[serde(default)]
    pub ordered_globals: Option<Vec<String>>,

    /// Raw stack frames, outermost first
    #[serde(default)]
    pub stack_to_render: Option<Vec<RawFrame>>,

    /// Precomputed heap from a richer upstream source
    #[serde(default)]
    pub heap: Option<Heap>,

    /// Captured standard output so far
    #[serde(default)]
    pub stdout: Option<String>,

    /// Exception message, if one was raised at this step
    #[serde(default)]
    pub exception_msg: Option<String>,
}

/// One raw stack frame
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFrame {
    #[serde(default)]
    pub frame_id: Option<u64>,

    #[serde(default)]
    pub func_name: Option<String>,

    #[serde(default)]
    pub locals: Option<Bindings>,

    /// Declared variable order; significant and never re-sorted
    #[serde(default)]
    pub ordered_varnames: Option<Vec<String>>,

    /// Ancestor frame ids; empty means owned by module scope
    #[serde(default)]
    pub parent_frame_id_list: Option<Vec<u64>>,

    #[serde(default)]
    pub unique_hash: Option<String>,
}
