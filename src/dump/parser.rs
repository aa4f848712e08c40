//! Dump line parser
//!
//! Open Library dump lines are tab separated metadata (type, key, revision,
//! last modified) followed by the JSON record. Everything before the first
//! `{` is ignored.

use serde_json::{Map, Value};

use crate::error::LineError;

/// JSON object of one dump record
pub type RawRecord = Map<String, Value>;

/// Return the JSON payload of a dump line, starting at the first `{`
pub fn extract_payload(line: &str) -> Result<&str, LineError> {
    line.find('{')
        .map(|start| &line[start..])
        .ok_or(LineError::MalformedLine)
}

/// Extract and parse the JSON object carried by a dump line
pub fn parse_line(line: &str) -> Result<RawRecord, LineError> {
    let payload = extract_payload(line)?;
    match serde_json::from_str::<Value>(payload)? {
        Value::Object(map) => Ok(map),
        other => Err(LineError::MalformedJson(format!(
            "expected an object, got {}",
            json_type(&other)
        ))),
    }
}

/// Required string field
pub fn required_str<'a>(record: &'a RawRecord, field: &str) -> Result<&'a str, LineError> {
    match record.get(field) {
        None | Some(Value::Null) => Err(LineError::RequiredFieldMissing(field.to_string())),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(LineError::invalid(
            field,
            format!("expected a string, got {}", json_type(other)),
        )),
    }
}

/// Optional string field; absent, null or non-string values read as `None`
pub fn optional_str<'a>(record: &'a RawRecord, field: &str) -> Option<&'a str> {
    record.get(field).and_then(Value::as_str)
}

/// `record[outer][inner]` as a string when every level is present
pub fn nested_str<'a>(record: &'a RawRecord, outer: &str, inner: &str) -> Option<&'a str> {
    record
        .get(outer)
        .and_then(Value::as_object)
        .and_then(|obj| obj.get(inner))
        .and_then(Value::as_str)
}

/// Optional array field; absent or null reads as `None`
pub fn optional_array<'a>(
    record: &'a RawRecord,
    field: &str,
) -> Result<Option<&'a Vec<Value>>, LineError> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(LineError::invalid(
            field,
            format!("expected an array, got {}", json_type(other)),
        )),
    }
}

/// Text form of a scalar JSON value: strings unquoted, numbers and booleans
/// as written
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
