//! Main parser for raw tracer output.
//!
//! Accepts either a bare array of steps or the tracer's wrapped
//! `{ "code": ..., "trace": [...] }` document. Unlike the per-field
//! defaults inside a step, a step that cannot be decoded at all aborts
//! the whole parse.

use super::schema::RawStep;
use crate::utils::config::TRACE_FIELD_NAMES;
use crate::utils::error::ParseError;
use log::debug;
use serde_json::Value;

/// Decoded raw trace plus the traced program text, when supplied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrace {
    pub source: Option<String>,
    pub steps: Vec<RawStep>,
}

impl RawTrace {
    pub fn new(steps: Vec<RawStep>) -> Self {
        Self {
            source: None,
            steps,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Parse a raw trace from a JSON string
///
/// # Errors
/// * `ParseError::JsonError` - Not valid JSON
/// * see [`parse_trace`]
pub fn parse_trace_str(input: &str) -> Result<RawTrace, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    parse_trace(&value)
}

/// Parse a raw trace from already-decoded JSON
///
/// # Errors
/// * `ParseError::InvalidFormat` - Top level is neither a step array nor a wrapper object
/// * `ParseError::InvalidStep` - A step is not an object or one of its fields is malformed
pub fn parse_trace(raw: &Value) -> Result<RawTrace, ParseError> {
    let (steps, source) = detect_trace_format(raw)?;

    let steps = steps
        .iter()
        .enumerate()
        .map(|(index, step)| parse_step(index, step))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Parsed {} raw steps", steps.len());

    Ok(RawTrace { source, steps })
}

/// Locate the step array and optional program text
///
/// **Private** - internal helper for parse_trace
fn detect_trace_format(raw: &Value) -> Result<(&[Value], Option<String>), ParseError> {
    match raw {
        Value::Array(steps) => Ok((steps.as_slice(), None)),

        Value::Object(obj) => {
            let steps = TRACE_FIELD_NAMES
                .iter()
                .find_map(|field| obj.get(*field).and_then(Value::as_array))
                .ok_or_else(|| {
                    ParseError::InvalidFormat(format!(
                        "Trace object has no step array (expected one of: {})",
                        TRACE_FIELD_NAMES.join(", ")
                    ))
                })?;
            let source = obj.get("code").and_then(Value::as_str).map(str::to_string);
            Ok((steps.as_slice(), source))
        }

        other => Err(ParseError::InvalidFormat(format!(
            "Trace must be a JSON array or object, found {}",
            json_kind(other)
        ))),
    }
}

/// Decode a single step
///
/// **Private** - internal helper for parse_trace
fn parse_step(index: usize, value: &Value) -> Result<RawStep, ParseError> {
    if !value.is_object() {
        return Err(ParseError::InvalidStep {
            index,
            reason: format!("step must be a JSON object, found {}", json_kind(value)),
        });
    }

    serde_json::from_value(value.clone()).map_err(|e| ParseError::InvalidStep {
        index,
        reason: e.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
