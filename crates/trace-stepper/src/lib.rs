//! Trace Stepper
//!
//! Reconstructs, for every step of an instrumented interpreter's trace,
//! the live stack frames and the heap objects they point at, and lets a
//! caller move forward and backward through the result.
//!
//! ```ignore
//! use trace_stepper::{parse_trace_str, NormalizerConfig, Session};
//!
//! let raw = parse_trace_str(&std::fs::read_to_string("trace.json")?)?;
//! let mut session = Session::open(&raw, NormalizerConfig::default())?;
//! session.navigator_mut().next();
//! let step = session.current_step();
//! ```

pub mod commands;
pub mod heap;
pub mod navigator;
pub mod normalizer;
pub mod output;
pub mod parser;
pub mod utils;

pub use heap::{Heap, HeapId, HeapInterner, HeapObject, Reference, Value};
pub use navigator::{ExecutionStatus, Session, StepNavigator};
pub use normalizer::{normalize_trace, CanonicalStep, Frame, FrameBuilder, TraceNormalizer};
pub use parser::{parse_trace, parse_trace_str, Bindings, EventKind, RawFrame, RawStep, RawTrace, RawValue};
pub use utils::config::NormalizerConfig;
