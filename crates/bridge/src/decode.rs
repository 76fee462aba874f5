//! Decoding of companion stdout.
//!
//! Decoding never fails: output that is not a JSON object degrades to a
//! raw-output success value.

use serde_json::{json, Map, Value};

/// Result of decoding a successful invocation's stdout.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedResult {
    /// stdout was empty (or whitespace only).
    Empty,
    /// stdout was a JSON object; passed through verbatim.
    Document(Map<String, Value>),
    /// stdout was something else; the trimmed text is kept as-is.
    Raw(String),
}

impl DecodedResult {
    /// Decode raw stdout text.
    pub fn decode(stdout: &str) -> Self {
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            return DecodedResult::Empty;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(map)) => DecodedResult::Document(map),
            Ok(other) => {
                tracing::debug!(kind = json_kind(&other), "Companion output is not an object");
                DecodedResult::Raw(trimmed.to_string())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Companion output is not JSON");
                DecodedResult::Raw(trimmed.to_string())
            }
        }
    }

    /// Render as the JSON value handed to callers.
    pub fn into_value(self) -> Value {
        match self {
            DecodedResult::Empty => json!({ "success": true }),
            DecodedResult::Document(map) => Value::Object(map),
            DecodedResult::Raw(output) => json!({ "success": true, "output": output }),
        }
    }

    /// Whether the companion produced a structured document.
    pub fn is_document(&self) -> bool {
        matches!(self, DecodedResult::Document(_))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
