//! Canonical step schema consumed by renderers.

use crate::heap::{Heap, HeapId, HeapObject, Value};
use crate::parser::EventKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One encoded stack frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub frame_id: u64,

    pub func_name: String,

    /// Local names in declared order
    pub ordered_varnames: Vec<String>,

    pub encoded_locals: BTreeMap<String, Value>,

    /// Ancestor frame ids; empty means owned by module scope
    pub parent_frame_id_list: Vec<u64>,

    /// Currently executing frame
    pub is_highlighted: bool,

    /// Stable identity used to match this frame across steps
    pub unique_hash: String,
}

impl Frame {
    /// Direct caller frame, or `None` when owned by module scope
    pub fn parent_frame_id(&self) -> Option<u64> {
        self.parent_frame_id_list.first().copied()
    }

    /// Locals in declared order
    pub fn locals(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ordered_varnames
            .iter()
            .filter_map(|name| self.encoded_locals.get(name).map(|v| (name.as_str(), v)))
    }
}

/// Self-contained snapshot of program state at one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalStep {
    pub line: u32,

    pub event: EventKind,

    pub func_name: String,

    pub globals: BTreeMap<String, Value>,

    /// Global names in declared order
    pub ordered_globals: Vec<String>,

    /// Frames, outermost first
    pub stack_to_render: Vec<Frame>,

    /// Cumulative heap as of this step
    pub heap: Heap,

    pub stdout: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_msg: Option<String>,
}

impl CanonicalStep {
    /// Frame marked as currently executing, if any
    pub fn active_frame(&self) -> Option<&Frame> {
        self.stack_to_render.iter().find(|f| f.is_highlighted)
    }

    pub fn lookup(&self, heap_id: HeapId) -> Option<&HeapObject> {
        self.heap.get(&heap_id)
    }

    /// Globals in declared order
    pub fn globals_in_order(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ordered_globals
            .iter()
            .filter_map(|name| self.globals.get(name).map(|v| (name.as_str(), v)))
    }

    /// Heap ids referenced directly by globals and frame locals
    pub fn root_references(&self) -> BTreeSet<HeapId> {
        self.globals
            .values()
            .chain(
                self.stack_to_render
                    .iter()
                    .flat_map(|frame| frame.encoded_locals.values()),
            )
            .filter_map(Value::heap_id)
            .collect()
    }

    /// First reachable heap id with no entry in this step's heap
    pub fn find_dangling_reference(&self) -> Option<HeapId> {
        let mut pending: Vec<HeapId> = self.root_references().into_iter().collect();
        let mut visited = BTreeSet::new();

        while let Some(heap_id) = pending.pop() {
            if !visited.insert(heap_id) {
                continue;
            }
            match self.heap.get(&heap_id) {
                Some(object) => pending.extend(object.references()),
                None => return Some(heap_id),
            }
        }

        None
    }
}
