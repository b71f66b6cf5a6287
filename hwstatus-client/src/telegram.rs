//! Chat bot API

use hwstatus_core::dto::message::{BotApiResponse, SendMessage};
use reqwest::Client;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{error_text, read_json};

/// HTTP client for the Telegram bot API
///
/// The bot token is part of every method URL, so transport errors are
/// stripped of their URL before they leave this client.
#[derive(Clone)]
pub struct TelegramClient {
    /// Base URL of the bot API (e.g., "https://api.telegram.org")
    api_url: String,
    /// Bot token issued by BotFather
    token: String,
    /// HTTP client instance
    client: Client,
}

impl TelegramClient {
    /// Create a new bot API client
    ///
    /// # Arguments
    /// * `api_url` - Base URL of the bot API
    /// * `token` - Bot token
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(api_url, token, Client::new())
    }

    /// Create a new bot API client with a custom HTTP client
    pub fn with_client(api_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        let api_url = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the bot API
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Send a text message to a chat
    ///
    /// # Arguments
    /// * `chat_id` - Destination chat id
    /// * `text` - Message text, sent as plain text
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        debug!("Sending message to chat {}", chat_id);

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessage {
                chat_id: chat_id.to_string(),
                text: text.to_string(),
            })
            .send()
            .await
            .map_err(|e| ClientError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = error_text(response).await;
            let message = serde_json::from_str::<BotApiResponse>(&error_text)
                .ok()
                .and_then(|r| r.description)
                .unwrap_or(error_text);
            return Err(ClientError::upstream_status(status.as_u16(), message));
        }

        let body = read_json(response).await.map_err(|e| match e {
            ClientError::Network(e) => ClientError::Network(e.without_url()),
            other => other,
        })?;
        let reply: BotApiResponse = serde_json::from_value(body)
            .map_err(|e| ClientError::Decode(format!("Unexpected bot API response: {}", e)))?;

        if !reply.ok {
            return Err(ClientError::Rejected(
                reply
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_url", &self.api_url)
            .field("token", &"***")
            .finish()
    }
}
