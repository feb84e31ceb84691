//! Error types for configuration and feed loading.
//!
//! The rotation itself never fails: a missing record or an ineligible view
//! only pauses it. These errors cover the ambient work around it.

use thiserror::Error;

/// Errors raised while configuring the ticker or reading a feed.
#[derive(Debug, Error)]
pub enum TickerError {
    /// Configuration could not be loaded or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A duration string could not be parsed.
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// A panel registry must hold at least one panel.
    #[error("Panel registry is empty")]
    EmptyRegistry,

    /// Reading a feed file failed.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),

    /// A feed file did not contain valid JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, TickerError>;
