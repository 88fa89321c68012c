//! Heap objects, references and identity assignment.
//!
//! Composite values never appear inline in a binding: they live in a
//! heap keyed by an integer id and bindings hold a [`Reference`] to them.

pub mod interner;
pub mod object;

// Re-export main types
pub use interner::HeapInterner;
pub use object::{Heap, HeapId, HeapObject, Reference, Value};
