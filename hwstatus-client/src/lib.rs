//! hwstatus HTTP Clients
//!
//! Small, typed HTTP clients for the two APIs the notifier consumes:
//! - [`PracticumClient`]: the homework status endpoint
//! - [`TelegramClient`]: the chat bot API used to deliver notifications
//!
//! # Example
//!
//! ```no_run
//! use hwstatus_client::{PracticumClient, TelegramClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hwstatus_client::ClientError> {
//!     let practicum = PracticumClient::new(
//!         "https://practicum.yandex.ru/api/user_api/homework_statuses/",
//!         "api-token",
//!     );
//!     let response = practicum.fetch_statuses(0).await?;
//!
//!     let telegram = TelegramClient::new("https://api.telegram.org", "bot-token");
//!     telegram.send_message("123456", &response.to_string()).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod practicum;
mod telegram;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use practicum::PracticumClient;
pub use telegram::TelegramClient;

use serde_json::Value as JsonValue;

// =============================================================================
// Response Handlers
// =============================================================================

/// Reads a response body as JSON without imposing any shape on it
///
/// Transport failures while reading the body stay [`ClientError::Network`];
/// a body that arrives intact but does not parse is [`ClientError::Decode`].
async fn read_json(response: reqwest::Response) -> Result<JsonValue> {
    let body = response.text().await?;

    serde_json::from_str(&body)
        .map_err(|e| ClientError::Decode(format!("Failed to parse JSON response: {}", e)))
}

/// Reads the body of a failed response for error reporting
async fn error_text(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string())
}

/// Base URL of a local port that was just released, so nothing listens on it
#[cfg(test)]
pub(crate) fn closed_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
