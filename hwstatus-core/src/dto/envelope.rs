//! Homework status API envelope

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{SchemaError, json_type};

/// Validated response of the homework status endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Raw homework records, most recent first
    pub homeworks: Vec<JsonValue>,

    /// Server time of the response, in unix seconds
    pub current_date: i64,
}

impl Envelope {
    /// The most recent homework record, if any
    pub fn latest(&self) -> Option<&JsonValue> {
        self.homeworks.first()
    }
}

/// Checks a decoded response against the documented envelope shape
///
/// Records inside `homeworks` are not inspected here; they are validated one
/// at a time when a message is built from them.
pub fn validate_envelope(response: JsonValue) -> Result<Envelope, SchemaError> {
    let mut fields = match response {
        JsonValue::Object(fields) => fields,
        other => return Err(SchemaError::NotAnObject(json_type(&other))),
    };

    let homeworks = match fields.remove("homeworks") {
        Some(JsonValue::Array(homeworks)) => homeworks,
        Some(other) => {
            return Err(SchemaError::WrongType {
                key: "homeworks",
                expected: "an array",
                found: json_type(&other),
            });
        }
        None => return Err(SchemaError::MissingKey("homeworks")),
    };

    let current_date = fields
        .get("current_date")
        .ok_or(SchemaError::MissingKey("current_date"))?;
    let current_date = current_date.as_i64().ok_or(SchemaError::WrongType {
        key: "current_date",
        expected: "an integer",
        found: json_type(current_date),
    })?;

    Ok(Envelope {
        homeworks,
        current_date,
    })
}
