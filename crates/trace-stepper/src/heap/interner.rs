//! Value-based heap identity assignment.
//!
//! Identity is decided by structural serialization, not by the live
//! object the value came from:
//! - two values that serialize identically share one heap id, even if
//!   they were distinct objects in the traced program;
//! - the table is consulted once, at first sight. A list that later
//!   gains an element serializes differently and gets a new id, while
//!   the old id keeps the old contents.
//!
//! Ids come from one counter starting at 1 and are never freed, so every
//! object ever shown stays addressable when stepping backwards.

use super::object::{Heap, HeapId, HeapObject, Reference, Value};
use crate::parser::RawValue;
use log::{debug, trace};
use std::collections::{BTreeSet, HashMap};

/// Borrowed view of a composite raw value
enum Shape<'a> {
    List(&'a [RawValue]),
    Mapping(&'a [(String, RawValue)]),
    Function {
        name: &'a str,
        source: &'a str,
    },
    Instance {
        class_name: &'a str,
        fields: &'a [(String, RawValue)],
    },
}

impl Shape<'_> {
    fn name(&self) -> &'static str {
        match self {
            Shape::List(_) => "list",
            Shape::Mapping(_) => "mapping",
            Shape::Function { .. } => "function",
            Shape::Instance { .. } => "instance",
        }
    }
}

/// Identity table for one normalization pass
#[derive(Debug)]
pub struct HeapInterner {
    next_id: HeapId,
    table: HashMap<String, HeapId>,
}

impl Default for HeapInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl HeapInterner {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            table: HashMap::new(),
        }
    }

    /// Id the next new object would receive
    pub fn next_id(&self) -> HeapId {
        self.next_id
    }

    /// Number of distinct structural values seen
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Make sure future allocations land above `heap_id`
    ///
    /// Used after an upstream heap is merged so its ids are never handed out again.
    pub fn reserve_through(&mut self, heap_id: HeapId) {
        self.next_id = self.next_id.max(heap_id.saturating_add(1));
    }

    /// Drop identities whose heap entries an upstream heap replaced
    ///
    /// `heap` is the merged heap. Besides the overwritten ids, any known
    /// object that reaches one of them through its references no longer
    /// encodes what its key says, so it is forgotten as well. The next
    /// sighting of those values allocates a fresh id.
    pub fn forget_overwritten(&mut self, overwritten: &BTreeSet<HeapId>, heap: &Heap) {
        if overwritten.is_empty() || self.table.is_empty() {
            return;
        }

        let known: BTreeSet<HeapId> = self.table.values().copied().collect();
        let mut stale: BTreeSet<HeapId> = overwritten.intersection(&known).copied().collect();
        let mut poisoned = overwritten.clone();

        // Propagate to known parents until nothing changes
        loop {
            let parents: Vec<HeapId> = known
                .iter()
                .copied()
                .filter(|id| !poisoned.contains(id))
                .filter(|id| {
                    heap.get(id).is_some_and(|object| {
                        object.references().iter().any(|r| poisoned.contains(r))
                    })
                })
                .collect();
            if parents.is_empty() {
                break;
            }
            poisoned.extend(parents.iter().copied());
            stale.extend(parents);
        }

        if !stale.is_empty() {
            debug!("Forgetting {} identities replaced by an upstream heap", stale.len());
            self.table.retain(|_, heap_id| !stale.contains(heap_id));
        }
    }

    /// Encode any raw value: composites become references, everything else passes through
    pub fn encode(&mut self, value: &RawValue, heap: &mut Heap) -> Value {
        let shape = match value {
            RawValue::Null => return Value::Null,
            RawValue::Bool(b) => return Value::Bool(*b),
            RawValue::Number(n) => return Value::Number(n.clone()),
            RawValue::Str(s) => return Value::Str(s.clone()),
            RawValue::Ref(r) => return Value::Ref(*r),
            RawValue::List(items) => Shape::List(items),
            RawValue::Mapping(entries) => Shape::Mapping(entries),
            RawValue::Function { name, source } => Shape::Function { name, source },
            RawValue::Instance { class_name, fields } => Shape::Instance { class_name, fields },
        };
        Value::Ref(self.intern_shape(value, shape, heap))
    }

    /// Intern a composite value, recording its encoding into `heap`
    ///
    /// Returns `None` for primitives and pre-encoded references, which need no heap entry.
    pub fn intern(&mut self, value: &RawValue, heap: &mut Heap) -> Option<Reference> {
        if !value.is_composite() {
            return None;
        }
        match self.encode(value, heap) {
            Value::Ref(reference) => Some(reference),
            _ => None,
        }
    }

    fn intern_shape(&mut self, value: &RawValue, shape: Shape<'_>, heap: &mut Heap) -> Reference {
        let key = value.structural_key();

        if let Some(&heap_id) = self.table.get(&key) {
            // Already known; only re-record if this heap lost the entry
            if !heap.contains_key(&heap_id) {
                let object = self.build_object(shape, heap);
                heap.insert(heap_id, object);
            }
            return Reference::new(heap_id);
        }

        let heap_id = self.next_id;
        self.next_id += 1;
        self.table.insert(key, heap_id);
        trace!("Interned new {} as heap object {}", shape.name(), heap_id);

        let object = self.build_object(shape, heap);
        heap.insert(heap_id, object);

        Reference::new(heap_id)
    }

    /// Encode one composite; nested composites are interned first
    fn build_object(&mut self, shape: Shape<'_>, heap: &mut Heap) -> HeapObject {
        match shape {
            Shape::List(items) => HeapObject::List {
                elements: items.iter().map(|item| self.encode(item, heap)).collect(),
            },
            Shape::Mapping(entries) => HeapObject::Mapping {
                entries: self.encode_entries(entries, heap),
            },
            Shape::Function { name, source } => HeapObject::Function {
                name: name.to_string(),
                body_digest: RawValue::body_digest(source),
            },
            Shape::Instance { class_name, fields } => HeapObject::Instance {
                class_name: class_name.to_string(),
                fields: self.encode_entries(fields, heap),
            },
        }
    }

    fn encode_entries(
        &mut self,
        entries: &[(String, RawValue)],
        heap: &mut Heap,
    ) -> Vec<(String, Value)> {
        entries
            .iter()
            .map(|(k, v)| (k.clone(), self.encode(v, heap)))
            .collect()
    }
}
