//! Chat bot message DTOs

use serde::{Deserialize, Serialize};

/// Request body of the bot API `sendMessage` method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessage {
    /// Destination chat, either a numeric id or an `@channel` name
    pub chat_id: String,

    pub text: String,
}

/// Common wrapper around every bot API response
///
/// The API answers `{"ok": true, "result": ...}` on success and
/// `{"ok": false, "description": "..."}` on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct BotApiResponse {
    pub ok: bool,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub error_code: Option<i64>,
}
