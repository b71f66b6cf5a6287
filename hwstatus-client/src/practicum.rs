//! Homework status endpoint

use reqwest::{Client, StatusCode};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{error_text, read_json};

/// HTTP client for the homework status endpoint
///
/// The endpoint is a single resource; `from_date` selects the homeworks whose
/// status changed since that moment.
#[derive(Clone)]
pub struct PracticumClient {
    /// Full URL of the status resource
    endpoint: String,
    /// OAuth token sent with every request
    token: String,
    /// HTTP client instance
    client: Client,
}

impl PracticumClient {
    /// Create a new homework status client
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the homework status resource
    /// * `token` - OAuth token of the student
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, token, Client::new())
    }

    /// Create a new homework status client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework statuses changed since `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Lower bound of the poll window, in unix seconds
    ///
    /// # Returns
    /// The decoded response body, not yet checked against the envelope shape
    ///
    /// # Errors
    /// * [`ClientError::Network`] when the endpoint cannot be reached
    /// * [`ClientError::UpstreamStatus`] for any status other than 200
    /// * [`ClientError::Decode`] when the body is not JSON
    pub async fn fetch_statuses(&self, from_date: i64) -> Result<JsonValue> {
        debug!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = error_text(response).await;
            return Err(ClientError::upstream_status(status.as_u16(), error_text));
        }

        read_json(response).await
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const PATH: &str = "/api/user_api/homework_statuses/";

    #[tokio::test]
    async fn test_fetch_sends_token_and_cursor() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .match_header("authorization", "OAuth secret")
            .match_query(Matcher::UrlEncoded("from_date".into(), "1549962000".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"homeworks": [], "current_date": 1549962100}"#)
            .create_async()
            .await;

        let client = PracticumClient::new(format!("{}{}", server.url(), PATH), "secret");
        let body = client.fetch_statuses(1549962000).await.unwrap();

        assert_eq!(body, json!({"homeworks": [], "current_date": 1549962100}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_ok_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let client = PracticumClient::new(format!("{}{}", server.url(), PATH), "secret");
        let err = client.fetch_statuses(0).await.unwrap_err();

        assert!(err.is_server_error());
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_fetch_other_success_codes_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(204)
            .create_async()
            .await;

        let client = PracticumClient::new(format!("{}{}", server.url(), PATH), "secret");
        let err = client.fetch_statuses(0).await.unwrap_err();

        assert!(matches!(err, ClientError::UpstreamStatus { status: 204, .. }));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = PracticumClient::new(format!("{}{}", server.url(), PATH), "secret");
        let err = client.fetch_statuses(0).await.unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_endpoint() {
        let client = PracticumClient::new(
            format!("{}/statuses", crate::closed_local_url()),
            "secret",
        );
        let err = client.fetch_statuses(0).await.unwrap_err();

        assert!(matches!(err, ClientError::Network(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = PracticumClient::new("http://localhost/statuses", "secret");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret"));
        assert_eq!(client.endpoint(), "http://localhost/statuses");
    }
}
