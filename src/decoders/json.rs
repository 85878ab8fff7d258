//! JSON document decoder

use std::path::Path;

use serde_json::Value;

use crate::error::{ReaderError, Result};

pub fn parse(path: &Path) -> Result<Value> {
    let source = super::read_utf8(path)?;
    serde_json::from_str(&source).map_err(|e| ReaderError::decode(path, e.to_string()))
}

/// Decode a JSON document whose top level must be an object
pub fn parse_object(path: &Path) -> Result<serde_json::Map<String, Value>> {
    match parse(path)? {
        Value::Object(map) => Ok(map),
        other => Err(ReaderError::decode(
            path,
            format!("expected a JSON object, found {}", json_type_name(&other)),
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
