//! Notifications repository
//!
//! Delivers text messages to the user's chat.

use async_trait::async_trait;
use hwstatus_client::{ClientError, TelegramClient};
use thiserror::Error;

/// A message could not be delivered
#[derive(Debug, Error)]
#[error("failed to deliver message: {0}")]
pub struct NotifyError(#[from] pub ClientError);

/// Repository trait for delivering notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message, without retrying
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// Bot API implementation of Notifier bound to a single chat
#[derive(Debug)]
pub struct TelegramNotifier {
    client: TelegramClient,
    chat_id: String,
}

impl TelegramNotifier {
    /// Creates a notifier that writes to `chat_id`
    pub fn new(client: TelegramClient, chat_id: String) -> Self {
        Self { client, chat_id }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        self.client.send_message(&self.chat_id, message).await?;
        Ok(())
    }
}
