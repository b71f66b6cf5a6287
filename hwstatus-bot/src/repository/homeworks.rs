//! Homework status repository
//!
//! Fetches raw homework status responses for a poll window.

use async_trait::async_trait;
use hwstatus_client::{ClientError, PracticumClient};
use serde_json::Value as JsonValue;

/// Repository trait for reading homework statuses
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetches the statuses that changed since `cursor`
    ///
    /// # Arguments
    /// * `cursor` - Lower bound of the poll window, in unix seconds
    ///
    /// # Returns
    /// The decoded, not yet validated, response body
    async fn fetch_status(&self, cursor: i64) -> Result<JsonValue, ClientError>;
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch_status(&self, cursor: i64) -> Result<JsonValue, ClientError> {
        self.fetch_statuses(cursor).await
    }
}
