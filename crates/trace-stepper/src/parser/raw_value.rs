//! Raw binding values as they arrive from the tracer.
//!
//! JSON arrays are list-like and JSON objects mapping-like. Two marker
//! objects carry the shapes JSON cannot express directly:
//!
//! ```text
//! {"$function": {"name": "add", "source": "function add(a, b) { ... }"}}
//! {"$instance": {"class": "Point", "fields": {"x": 1, "y": 2}}}
//! ```
//!
//! `{"kind": "ref", "heap_id": 3}` is an already-encoded reference and is
//! passed through untouched.

use crate::heap::Reference;
use crate::utils::config::FUNCTION_DIGEST_CHARS;
use serde::Deserialize;
use serde_json::{json, Map, Number, Value as Json};

const FUNCTION_MARKER: &str = "$function";
const INSTANCE_MARKER: &str = "$instance";

/// A value bound to a name in a raw step, before interning
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(Number),
    Str(String),
    /// Reference already encoded upstream
    Ref(Reference),
    List(Vec<RawValue>),
    Mapping(Vec<(String, RawValue)>),
    Function {
        name: String,
        source: String,
    },
    Instance {
        class_name: String,
        fields: Vec<(String, RawValue)>,
    },
}

impl RawValue {
    /// Whether this value must live on the heap
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            RawValue::List(_)
                | RawValue::Mapping(_)
                | RawValue::Function { .. }
                | RawValue::Instance { .. }
        )
    }

    /// Source prefix used to identify a callable
    pub fn body_digest(source: &str) -> String {
        source.chars().take(FUNCTION_DIGEST_CHARS).collect()
    }

    /// Canonical structural serialization used as the interning key.
    ///
    /// Two values with the same contents produce the same key regardless of
    /// where they came from. Callables are keyed by name and body digest.
    pub fn structural_key(&self) -> String {
        match self {
            RawValue::Function { name, source } => {
                format!("func_{}_{}", name, Self::body_digest(source))
            }
            other => other.to_json().to_string(),
        }
    }

    /// Convert back into the JSON wire shape
    pub fn to_json(&self) -> Json {
        match self {
            RawValue::Null => Json::Null,
            RawValue::Bool(b) => Json::Bool(*b),
            RawValue::Number(n) => Json::Number(n.clone()),
            RawValue::Str(s) => Json::String(s.clone()),
            RawValue::Ref(r) => json!({ "kind": "ref", "heap_id": r.heap_id }),
            RawValue::List(items) => Json::Array(items.iter().map(RawValue::to_json).collect()),
            RawValue::Mapping(entries) => Json::Object(entries_to_json(entries)),
            RawValue::Function { name, source } => json!({
                FUNCTION_MARKER: { "name": name, "source": source }
            }),
            RawValue::Instance { class_name, fields } => json!({
                INSTANCE_MARKER: { "class": class_name, "fields": entries_to_json(fields) }
            }),
        }
    }
}

fn entries_to_json(entries: &[(String, RawValue)]) -> Map<String, Json> {
    entries
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n.into())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Str(s.to_string())
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl TryFrom<Json> for RawValue {
    type Error = String;

    fn try_from(value: Json) -> Result<Self, Self::Error> {
        match value {
            Json::Null => Ok(RawValue::Null),
            Json::Bool(b) => Ok(RawValue::Bool(b)),
            Json::Number(n) => Ok(RawValue::Number(n)),
            Json::String(s) => Ok(RawValue::Str(s)),
            Json::Array(items) => items
                .into_iter()
                .map(RawValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(RawValue::List),
            Json::Object(obj) => classify_object(obj),
        }
    }
}

/// Decide which shape a JSON object stands for
fn classify_object(mut obj: Map<String, Json>) -> Result<RawValue, String> {
    if obj.len() == 1 {
        if let Some(body) = obj.remove(FUNCTION_MARKER) {
            return decode_function(body);
        }
        if let Some(body) = obj.remove(INSTANCE_MARKER) {
            return decode_instance(body);
        }
    }

    if is_reference_shape(&obj) {
        let reference: Reference =
            serde_json::from_value(Json::Object(obj)).map_err(|e| e.to_string())?;
        return Ok(RawValue::Ref(reference));
    }

    decode_entries(obj).map(RawValue::Mapping)
}

fn is_reference_shape(obj: &Map<String, Json>) -> bool {
    obj.len() == 2
        && obj.get("kind").and_then(Json::as_str) == Some("ref")
        && obj.contains_key("heap_id")
}

fn decode_function(body: Json) -> Result<RawValue, String> {
    let name = body
        .get("name")
        .and_then(Json::as_str)
        .ok_or_else(|| format!("{} marker requires a string \"name\"", FUNCTION_MARKER))?
        .to_string();
    let source = match body.get("source") {
        None | Some(Json::Null) => String::new(),
        Some(Json::String(s)) => s.clone(),
        Some(other) => {
            return Err(format!(
                "{} \"source\" must be a string, found {}",
                FUNCTION_MARKER, other
            ))
        }
    };
    Ok(RawValue::Function { name, source })
}

fn decode_instance(body: Json) -> Result<RawValue, String> {
    let Json::Object(mut body) = body else {
        return Err(format!("{} marker must wrap an object", INSTANCE_MARKER));
    };
    let class_name = body
        .get("class")
        .and_then(Json::as_str)
        .ok_or_else(|| format!("{} marker requires a string \"class\"", INSTANCE_MARKER))?
        .to_string();
    let fields = match body.remove("fields") {
        None | Some(Json::Null) => Vec::new(),
        Some(Json::Object(fields)) => decode_entries(fields)?,
        Some(other) => {
            return Err(format!(
                "{} \"fields\" must be an object, found {}",
                INSTANCE_MARKER, other
            ))
        }
    };
    Ok(RawValue::Instance { class_name, fields })
}

fn decode_entries(obj: Map<String, Json>) -> Result<Vec<(String, RawValue)>, String> {
    obj.into_iter()
        .map(|(k, v)| RawValue::try_from(v).map(|v| (k, v)))
        .collect()
}

/// Ordered name → value bindings (module globals or frame locals)
///
/// Insertion order from the wire is preserved; it is the fallback
/// display order when the step does not declare one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Map<String, serde_json::Value>")]
pub struct Bindings(Vec<(String, RawValue)>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, replacing an existing one with the same name in place
    pub fn insert(&mut self, name: impl Into<String>, value: RawValue) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, RawValue)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (S, RawValue)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.insert(name, value);
        }
        bindings
    }
}

impl TryFrom<Map<String, Json>> for Bindings {
    type Error = String;

    fn try_from(obj: Map<String, Json>) -> Result<Self, Self::Error> {
        decode_entries(obj).map(Bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: Json) -> RawValue {
        RawValue::try_from(value).unwrap()
    }

    #[test]
    fn test_classify_primitives() {
        assert_eq!(raw(json!(null)), RawValue::Null);
        assert_eq!(raw(json!(true)), RawValue::Bool(true));
        assert_eq!(raw(json!(7)), RawValue::from(7));
        assert_eq!(raw(json!("hi")), RawValue::from("hi"));
        assert!(!raw(json!(7)).is_composite());
    }

    #[test]
    fn test_classify_list_and_mapping() {
        let list = raw(json!([1, [2]]));
        assert_eq!(
            list,
            RawValue::List(vec![RawValue::from(1), RawValue::List(vec![RawValue::from(2)])])
        );

        let mapping = raw(json!({"b": 1, "a": 2}));
        let RawValue::Mapping(entries) = mapping else {
            panic!("expected mapping");
        };
        // insertion order survives decoding
        assert_eq!(entries[0].0, "b");
        assert_eq!(entries[1].0, "a");
    }

    #[test]
    fn test_classify_function_marker() {
        let value = raw(json!({"$function": {"name": "add", "source": "function add() {}"}}));
        assert_eq!(
            value,
            RawValue::Function {
                name: "add".to_string(),
                source: "function add() {}".to_string()
            }
        );
        assert!(value.is_composite());
    }

    #[test]
    fn test_classify_instance_marker() {
        let value = raw(json!({"$instance": {"class": "Point", "fields": {"x": 1}}}));
        assert_eq!(
            value,
            RawValue::Instance {
                class_name: "Point".to_string(),
                fields: vec![("x".to_string(), RawValue::from(1))]
            }
        );
    }

    #[test]
    fn test_malformed_markers_are_rejected() {
        assert!(RawValue::try_from(json!({"$function": {"source": "x"}})).is_err());
        assert!(RawValue::try_from(json!({"$instance": 3})).is_err());
        assert!(RawValue::try_from(json!({"$instance": {"class": "P", "fields": [1]}})).is_err());
    }

    #[test]
    fn test_classify_reference() {
        let value = raw(json!({"kind": "ref", "heap_id": 4}));
        assert_eq!(value, RawValue::Ref(Reference::new(4)));
    }

    #[test]
    fn test_structural_key_ignores_identity() {
        let a = raw(json!([1, 2, 3]));
        let b = raw(json!([1, 2, 3]));
        let c = raw(json!({"0": 1, "1": 2, "2": 3}));
        assert_eq!(a.structural_key(), b.structural_key());
        assert_ne!(a.structural_key(), c.structural_key());
    }

    #[test]
    fn test_function_key_uses_digest_prefix() {
        let long_body = "x".repeat(80);
        let f1 = RawValue::Function {
            name: "f".to_string(),
            source: format!("{}tail-one", long_body),
        };
        let f2 = RawValue::Function {
            name: "f".to_string(),
            source: format!("{}tail-two", long_body),
        };
        assert_eq!(f1.structural_key(), f2.structural_key());
        assert_eq!(RawValue::body_digest(&long_body).len(), FUNCTION_DIGEST_CHARS);
    }

    #[test]
    fn test_bindings_keep_order_and_replace_in_place() {
        let mut bindings: Bindings = [("z", RawValue::from(1)), ("a", RawValue::from(2))]
            .into_iter()
            .collect();
        bindings.insert("z", RawValue::from(3));
        assert_eq!(bindings.names(), vec!["z", "a"]);
        assert_eq!(bindings.get("z"), Some(&RawValue::from(3)));
        assert_eq!(bindings.len(), 2);
    }
}
