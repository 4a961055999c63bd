//! Error types for the monitor.

use thiserror::Error;

/// Failures while retrieving the exchange rate.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Http(String),

    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("HTTP {0}")]
    Status(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid rate data: {0} is not a valid number")]
    InvalidNumber(&'static str),

    #[error("all {attempts} attempts failed, last error: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

impl FetchError {
    /// Returns true if another attempt might succeed.
    /// Anything decided by the response body is final.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Http(_) | FetchError::Timeout(_) | FetchError::Status(_)
        )
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err.to_string())
    }
}

/// Failures reading, writing or validating the persisted configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid threshold: must be a positive number")]
    InvalidThreshold,
}

/// Failures of a single check cycle. The monitor keeps running after any of these.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("No threshold configured")]
    NoThreshold,

    #[error("Unable to fetch current exchange rate: {0}")]
    Fetch(#[from] FetchError),
}

/// Native notification delivery failures. Never leaves the dispatcher.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("native notifications not supported on {0}")]
    Unsupported(&'static str),

    #[error("Failed to spawn osascript: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("osascript failed with code {code:?}: {stderr}")]
    Exit { code: Option<i32>, stderr: String },

    #[error("osascript did not finish within {0}s")]
    Timeout(u64),
}

/// Errors that stop the process during startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid listen address {0}")]
    Address(String),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
