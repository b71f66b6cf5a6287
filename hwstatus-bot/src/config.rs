//! Bot configuration
//!
//! Defines the tokens, endpoints and timings the bot needs. The config is
//! built once at startup and handed to the components that need it; nothing
//! mutates it afterwards.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default pause between two polls of the status endpoint
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Default bot API base URL
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default timeout of a single outbound HTTP request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Startup configuration problems; all of them are fatal
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is absent or empty
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    /// A variable is present but its value cannot be used
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Bot configuration
#[derive(Clone)]
pub struct Config {
    /// OAuth token for the homework status endpoint
    pub practicum_token: String,

    /// Bot API token
    pub telegram_token: String,

    /// Chat that receives the notifications
    pub telegram_chat_id: String,

    /// Full URL of the homework status endpoint
    pub endpoint: String,

    /// Fixed pause between polls, whatever the outcome of the last one
    pub retry_period: Duration,

    /// Bot API base URL (overridable for self-hosted bot API servers)
    pub telegram_api_url: String,

    /// Timeout of each outbound HTTP request
    pub request_timeout: Duration,

    /// Optional file that receives a copy of the log
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new configuration with defaults for the optional settings
    pub fn new(
        practicum_token: String,
        telegram_token: String,
        telegram_chat_id: String,
        endpoint: String,
    ) -> Self {
        Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            retry_period: DEFAULT_RETRY_PERIOD,
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_file: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - PRACTICUM_TOKEN (required)
    /// - TELEGRAM_TOKEN (required)
    /// - TELEGRAM_CHAT_ID (required)
    /// - ENDPOINT (required)
    /// - RETRY_PERIOD (optional, seconds, default: 600)
    /// - TELEGRAM_API_URL (optional, default: https://api.telegram.org)
    /// - REQUEST_TIMEOUT (optional, seconds, default: 30)
    /// - LOG_FILE (optional, path of a log file to append to)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let seconds = |name: &'static str, default: Duration| match lookup(name) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::Invalid {
                    name,
                    reason: format!("`{}` is not a number of seconds ({})", value, e),
                }),
            None => Ok(default),
        };

        let mut config = Self::new(
            required("PRACTICUM_TOKEN")?,
            required("TELEGRAM_TOKEN")?,
            required("TELEGRAM_CHAT_ID")?,
            required("ENDPOINT")?,
        );

        config.retry_period = seconds("RETRY_PERIOD", DEFAULT_RETRY_PERIOD)?;
        config.request_timeout = seconds("REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT)?;

        if let Some(api_url) = lookup("TELEGRAM_API_URL").filter(|v| !v.is_empty()) {
            config.telegram_api_url = api_url;
        }

        config.log_file = lookup("LOG_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("ENDPOINT", &self.endpoint)?;
        check_url("TELEGRAM_API_URL", &self.telegram_api_url)?;

        if self.retry_period.is_zero() {
            return Err(ConfigError::Invalid {
                name: "RETRY_PERIOD",
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                name: "REQUEST_TIMEOUT",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

fn check_url(name: &'static str, url: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Invalid {
            name,
            reason: "must start with http:// or https://".to_string(),
        });
    }
    Ok(())
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("retry_period", &self.retry_period)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("request_timeout", &self.request_timeout)
            .field("log_file", &self.log_file)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn required_vars() -> HashMap<String, String> {
        vars(&[
            ("PRACTICUM_TOKEN", "practicum"),
            ("TELEGRAM_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("ENDPOINT", "https://practicum.yandex.ru/api/user_api/homework_statuses/"),
        ])
    }

    fn load(env: &HashMap<String, String>) -> Result<Config, ConfigError> {
        Config::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&required_vars()).unwrap();
        assert_eq!(config.retry_period, Duration::from_secs(600));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.telegram_api_url, "https://api.telegram.org");
        assert!(config.log_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_each_required_variable() {
        for name in ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID", "ENDPOINT"] {
            let mut env = required_vars();
            env.remove(name);
            assert_eq!(load(&env).unwrap_err(), ConfigError::Missing(name));

            env.insert(name.to_string(), "  ".to_string());
            assert_eq!(load(&env).unwrap_err(), ConfigError::Missing(name));
        }
    }

    #[test]
    fn test_optional_overrides() {
        let mut env = required_vars();
        env.extend(vars(&[
            ("RETRY_PERIOD", "60"),
            ("REQUEST_TIMEOUT", "5"),
            ("TELEGRAM_API_URL", "http://localhost:8081"),
            ("LOG_FILE", "main.log"),
        ]));

        let config = load(&env).unwrap();
        assert_eq!(config.retry_period, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.telegram_api_url, "http://localhost:8081");
        assert_eq!(config.log_file, Some(PathBuf::from("main.log")));
    }

    #[test]
    fn test_unparseable_retry_period() {
        let mut env = required_vars();
        env.insert("RETRY_PERIOD".to_string(), "ten minutes".to_string());
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid { name: "RETRY_PERIOD", .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let mut config = load(&required_vars()).unwrap();

        config.endpoint = "not-a-url".to_string();
        assert!(config.validate().is_err());
        config.endpoint = "http://localhost:8080/statuses".to_string();
        assert!(config.validate().is_ok());

        config.retry_period = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_tokens() {
        let config = load(&required_vars()).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("practicum\""));
        assert!(!debug.contains("123:abc"));
        assert!(debug.contains("42"));
    }
}
