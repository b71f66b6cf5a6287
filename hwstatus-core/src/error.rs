//! Schema validation errors

use thiserror::Error;

/// A response was well-formed JSON but did not have the expected shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The envelope was not a JSON object
    #[error("response is not an object, got {0}")]
    NotAnObject(&'static str),

    /// A required key was absent
    #[error("missing key `{0}` in response")]
    MissingKey(&'static str),

    /// A key was present but held a value of the wrong type
    #[error("key `{key}` must be {expected}, got {found}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The homework status is not one of the known verdicts
    #[error("unexpected homework status `{0}`")]
    UnknownStatus(String),
}

/// Names the JSON type of a value for error messages
pub(crate) fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
