//! Status poller
//!
//! Polls the homework status endpoint and relays the most recent status
//! change to the user's chat. One request is in flight at a time; every
//! cycle, successful or not, is followed by the same fixed pause.

use hwstatus_client::ClientError;
use hwstatus_core::SchemaError;
use hwstatus_core::domain::homework::extract_message;
use hwstatus_core::dto::envelope::validate_envelope;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::repository::{HomeworkSource, Notifier};

/// A failure that aborts a poll cycle
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] ClientError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl PollError {
    /// Identity of the failure for repeat detection
    ///
    /// Leaves out response bodies and transport details, which vary between
    /// otherwise identical failures.
    fn signature(&self) -> String {
        match self {
            PollError::Fetch(ClientError::Network(e)) if e.is_timeout() => {
                "network:timeout".to_string()
            }
            PollError::Fetch(ClientError::Network(e)) if e.is_connect() => {
                "network:connect".to_string()
            }
            PollError::Fetch(ClientError::Network(_)) => "network".to_string(),
            PollError::Fetch(ClientError::UpstreamStatus { status, .. }) => {
                format!("upstream:{}", status)
            }
            PollError::Fetch(ClientError::Decode(_)) => "decode".to_string(),
            PollError::Fetch(ClientError::Rejected(_)) => "rejected".to_string(),
            PollError::Schema(e) => format!("schema:{}", e),
        }
    }
}

/// What a single cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was found and a notification was attempted
    Notified {
        /// Cursor after the cycle
        cursor: i64,
        /// Whether the message reached the chat
        delivered: bool,
    },

    /// The endpoint reported no status changes
    NoUpdates,

    /// The cycle was aborted
    Failed {
        /// False when the same failure was already reported last cycle
        reported: bool,
    },
}

/// Poller that relays homework status changes
pub struct StatusPoller {
    source: Arc<dyn HomeworkSource>,
    notifier: Arc<dyn Notifier>,
    retry_period: Duration,
    /// Lower bound of the next poll window
    cursor: i64,
    /// Signature of the last reported failure
    last_error: Option<String>,
}

impl StatusPoller {
    /// Creates a new poller
    ///
    /// The first poll window starts one retry period before now.
    pub fn new(
        config: &Config,
        source: Arc<dyn HomeworkSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let lookback = i64::try_from(config.retry_period.as_secs()).unwrap_or(i64::MAX);
        let cursor = chrono::Utc::now().timestamp().saturating_sub(lookback);

        Self {
            source,
            notifier,
            retry_period: config.retry_period,
            cursor,
            last_error: None,
        }
    }

    /// Overrides the start of the first poll window
    #[allow(dead_code)]
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Lower bound of the next poll window
    #[allow(dead_code)]
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Starts the polling loop
    ///
    /// Never returns; the process is expected to be stopped by a signal.
    pub async fn run(&mut self) {
        info!(
            "Starting status poller (retry period: {:?}, cursor: {})",
            self.retry_period, self.cursor
        );

        loop {
            match self.run_cycle().await {
                CycleOutcome::Notified { cursor, delivered } => {
                    debug!(
                        "Cycle finished, cursor advanced to {} (delivered: {})",
                        cursor, delivered
                    );
                }
                CycleOutcome::NoUpdates => debug!("Cycle finished without updates"),
                CycleOutcome::Failed { reported } => {
                    debug!("Cycle aborted (reported: {})", reported);
                }
            }

            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Performs a single poll cycle and records its failure, if any
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(outcome) => {
                if self.last_error.take().is_some() {
                    warn!("Polling recovered after a failure");
                }
                outcome
            }
            Err(e) => CycleOutcome::Failed {
                reported: self.report_failure(&e),
            },
        }
    }

    /// Fetch, validate and relay the latest status change
    async fn poll_once(&mut self) -> Result<CycleOutcome, PollError> {
        let response = self.source.fetch_status(self.cursor).await?;
        let envelope = validate_envelope(response)?;

        let Some(latest) = envelope.latest() else {
            debug!("No new homework statuses since {}", self.cursor);
            return Ok(CycleOutcome::NoUpdates);
        };

        let message = extract_message(latest)?;
        let delivered = self.notify(&message).await;

        self.cursor = envelope.current_date;

        Ok(CycleOutcome::Notified {
            cursor: self.cursor,
            delivered,
        })
    }

    /// Sends a message; delivery failures are logged and swallowed
    async fn notify(&self, message: &str) -> bool {
        match self.notifier.notify(message).await {
            Ok(()) => {
                debug!("Message sent: {}", message);
                true
            }
            Err(e) => {
                error!("Bot could not send the message: {}", e);
                false
            }
        }
    }

    /// Logs a failure unless it repeats the previous one
    ///
    /// Returns whether the failure was reported.
    fn report_failure(&mut self, error: &PollError) -> bool {
        let signature = error.signature();

        if self.last_error.as_deref() == Some(signature.as_str()) {
            debug!("Same failure as the previous cycle: {}", error);
            return false;
        }

        error!("Сбой в работе программы: {}", error);
        self.last_error = Some(signature);
        true
    }
}
