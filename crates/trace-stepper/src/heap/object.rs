//! Canonical heap values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Heap object identifier
pub type HeapId = u64;

/// Heap map, ordered by id
pub type Heap = BTreeMap<HeapId, HeapObject>;

/// Pointer from a binding (or another heap object) to a heap entry
///
/// Serialized as `{"kind": "ref", "heap_id": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "ReferenceRepr", into = "ReferenceRepr")]
pub struct Reference {
    pub heap_id: HeapId,
}

impl Reference {
    pub fn new(heap_id: HeapId) -> Self {
        Self { heap_id }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ReferenceRepr {
    Ref { heap_id: HeapId },
}

impl From<ReferenceRepr> for Reference {
    fn from(repr: ReferenceRepr) -> Self {
        let ReferenceRepr::Ref { heap_id } = repr;
        Reference { heap_id }
    }
}

impl From<Reference> for ReferenceRepr {
    fn from(reference: Reference) -> Self {
        ReferenceRepr::Ref {
            heap_id: reference.heap_id,
        }
    }
}

/// A binding value: a primitive or a reference into the heap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Ref(Reference),
    Bool(bool),
    Number(serde_json::Number),
    Str(String),
    Null,
}

impl Value {
    /// Heap id this value points at, if it is a reference
    pub fn heap_id(&self) -> Option<HeapId> {
        match self {
            Value::Ref(r) => Some(r.heap_id),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Ref(_))
    }
}

impl From<Reference> for Value {
    fn from(reference: Reference) -> Self {
        Value::Ref(reference)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

/// Heap entry, tagged by shape
///
/// Serialized as an internally tagged object, e.g.
/// `{"type": "LIST", "elements": [1, 2]}`. Decoding an unknown tag fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HeapObject {
    #[serde(rename = "LIST")]
    List { elements: Vec<Value> },

    #[serde(rename = "DICT")]
    Mapping { entries: Vec<(String, Value)> },

    #[serde(rename = "FUNCTION")]
    Function { name: String, body_digest: String },

    #[serde(rename = "INSTANCE")]
    Instance {
        class_name: String,
        fields: Vec<(String, Value)>,
    },
}

impl HeapObject {
    /// Short lowercase label for the shape
    pub fn type_label(&self) -> &'static str {
        match self {
            HeapObject::List { .. } => "list",
            HeapObject::Mapping { .. } => "dict",
            HeapObject::Function { .. } => "function",
            HeapObject::Instance { .. } => "instance",
        }
    }

    /// Number of elements, entries or fields (0 for functions)
    pub fn len(&self) -> usize {
        match self {
            HeapObject::List { elements } => elements.len(),
            HeapObject::Mapping { entries } => entries.len(),
            HeapObject::Function { .. } => 0,
            HeapObject::Instance { fields, .. } => fields.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Heap ids this object points at directly
    pub fn references(&self) -> Vec<HeapId> {
        let values: Box<dyn Iterator<Item = &Value>> = match self {
            HeapObject::List { elements } => Box::new(elements.iter()),
            HeapObject::Mapping { entries } => Box::new(entries.iter().map(|(_, v)| v)),
            HeapObject::Function { .. } => Box::new(std::iter::empty()),
            HeapObject::Instance { fields, .. } => Box::new(fields.iter().map(|(_, v)| v)),
        };
        values.filter_map(Value::heap_id).collect()
    }
}
