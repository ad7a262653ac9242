//! Client configuration.
//!
//! Values come from the environment (a `.env` file is loaded first), then
//! command-line flags override them.
//!
//! | Variable                     | Default                 |
//! |------------------------------|-------------------------|
//! | `PASTPERFECT_API_URL`        | `http://localhost:8000` |
//! | `PASTPERFECT_TIMEOUT_SECS`   | `300` (`0` = no timeout)|
//! | `PASTPERFECT_CONCURRENCY`    | `1`                     |
//! | `PASTPERFECT_RETRIES`        | `0`                     |
//! | `PASTPERFECT_OUTPUT_DIR`     | `restored`              |
//! | `PASTPERFECT_SEND_SETTINGS`  | `false`                 |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use pastperfect::{ProcessingOptions, RetryPolicy, RESTORE_PATH};

use crate::error::{ClientError, ClientResult};

/// Default restoration backend (local development server).
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default per-request timeout; restorations chain several AI models.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Delay between retries in milliseconds
pub const RETRY_DELAY_MS: u64 = 1000;

/// Native client configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL, without the `/restore` path.
    pub api_url: String,
    pub request_timeout: Option<Duration>,
    pub concurrency: usize,
    /// Extra attempts after the first one.
    pub retries: u32,
    pub output_dir: PathBuf,
    /// Also send the settings JSON as a multipart field.
    pub send_settings: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            concurrency: 1,
            retries: 0,
            output_dir: PathBuf::from("restored"),
            send_settings: false,
        }
    }
}

impl ClientConfig {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> ClientResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("PASTPERFECT_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "PASTPERFECT_TIMEOUT_SECS")? {
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(concurrency) = parse_var::<usize>(&lookup, "PASTPERFECT_CONCURRENCY")? {
            config.concurrency = concurrency.max(1);
        }
        if let Some(retries) = parse_var::<u32>(&lookup, "PASTPERFECT_RETRIES")? {
            config.retries = retries;
        }
        if let Some(dir) = lookup("PASTPERFECT_OUTPUT_DIR").filter(|v| !v.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(send) = lookup("PASTPERFECT_SEND_SETTINGS") {
            config.send_settings = parse_bool("PASTPERFECT_SEND_SETTINGS", &send)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        Ok(())
    }

    /// Full URL of the restoration endpoint.
    pub fn restore_url(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), RESTORE_PATH)
    }

    /// Orchestrator options derived from this configuration.
    pub fn processing_options(&self) -> ProcessingOptions {
        ProcessingOptions {
            concurrency: self.concurrency.max(1),
            retry: RetryPolicy::attempts(self.retries.saturating_add(1), Duration::from_millis(RETRY_DELAY_MS)),
            request_timeout: self.request_timeout,
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> ClientResult<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ClientError::Config(format!("{} must be a non-negative integer, got '{}'", key, raw))),
    }
}

fn parse_bool(key: &str, raw: &str) -> ClientResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ClientError::Config(format!("{} must be a boolean, got '{}'", key, other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.restore_url(), "http://localhost:8000/restore");

        let options = config.processing_options();
        assert_eq!(options.concurrency, 1);
        assert_eq!(options.retry.max_attempts, 1);
        assert_eq!(options.request_timeout, Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("PASTPERFECT_API_URL", "https://api.example.com/"),
            ("PASTPERFECT_TIMEOUT_SECS", "0"),
            ("PASTPERFECT_CONCURRENCY", "3"),
            ("PASTPERFECT_RETRIES", "2"),
            ("PASTPERFECT_OUTPUT_DIR", "out"),
            ("PASTPERFECT_SEND_SETTINGS", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.restore_url(), "https://api.example.com/restore");
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(config.send_settings);

        let options = config.processing_options();
        assert_eq!(options.concurrency, 3);
        assert_eq!(options.retry.max_attempts, 3);
    }

    #[test]
    fn test_invalid_values() {
        let err = ClientConfig::from_lookup(lookup(&[("PASTPERFECT_CONCURRENCY", "many")])).unwrap_err();
        assert!(err.to_string().contains("PASTPERFECT_CONCURRENCY"));

        let err = ClientConfig::from_lookup(lookup(&[("PASTPERFECT_API_URL", "localhost:8000")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = ClientConfig::from_lookup(lookup(&[("PASTPERFECT_SEND_SETTINGS", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("boolean"));
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let config = ClientConfig::from_lookup(lookup(&[("PASTPERFECT_CONCURRENCY", "0")])).unwrap();
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_huge_retry_count_saturates() {
        let config = ClientConfig::from_lookup(lookup(&[("PASTPERFECT_RETRIES", "4294967295")])).unwrap();
        assert_eq!(config.processing_options().retry.max_attempts, u32::MAX);
    }
}
