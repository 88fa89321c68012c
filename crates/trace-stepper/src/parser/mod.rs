//! Raw trace parsing and schema definitions.
//!
//! This module handles:
//! - Classifying raw JSON values (primitive, list, mapping, callable, instance)
//! - Decoding raw steps and frames emitted by the instrumented interpreter
//! - Detecting the top-level trace shape

pub mod raw_trace;
pub mod raw_value;
pub mod schema;

// Re-export main types
pub use raw_trace::{parse_trace, parse_trace_str, RawTrace};
pub use raw_value::{Bindings, RawValue};
pub use schema::{EventKind, RawFrame, RawStep};
