//! Reconstruction of canonical steps from a raw trace.
//!
//! This module transforms raw steps into:
//! - Encoded stack frames (locals as primitives or references)
//! - Module-level bindings encoded the same way
//! - A cumulative heap valid as of each step

pub mod frame_builder;
pub mod schema;
pub mod trace;

// Re-export main types and functions
pub use frame_builder::FrameBuilder;
pub use schema::{CanonicalStep, Frame};
pub use trace::{normalize_trace, TraceNormalizer};
