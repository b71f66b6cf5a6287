//! Homework domain types

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

use crate::error::{SchemaError, json_type};

/// Review status of a homework submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// All statuses the notifier recognizes
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Fixed phrase sent to the user for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomeworkStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownStatus(s.to_string()))
    }
}

/// A homework record as reported by the review service
///
/// Only the fields the notifier uses are kept; anything else in the record
/// (ids, reviewer comments, dates) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homework {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl Homework {
    /// Parses a raw homework record
    ///
    /// `status` is checked before `homework_name`, so a record missing both
    /// reports the missing status.
    pub fn from_record(record: &JsonValue) -> Result<Self, SchemaError> {
        let status = string_field(record, "status")?;
        let homework_name = string_field(record, "homework_name")?;

        Ok(Self {
            homework_name: homework_name.to_string(),
            status: status.parse()?,
        })
    }

    /// Human-readable notification for this record
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}

/// Builds the notification text for a raw homework record
pub fn extract_message(record: &JsonValue) -> Result<String, SchemaError> {
    Homework::from_record(record).map(|homework| homework.message())
}

fn string_field<'a>(record: &'a JsonValue, key: &'static str) -> Result<&'a str, SchemaError> {
    let value = record.get(key).ok_or(SchemaError::MissingKey(key))?;
    value.as_str().ok_or(SchemaError::WrongType {
        key,
        expected: "a string",
        found: json_type(value),
    })
}
