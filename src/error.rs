//! Error types for the crate.
//!
//! Two failure classes cross the gateway boundary as structured data:
//! [`ValidationError`] (one or more field violations, collected before the
//! network call) and [`ExchangeError`] (the remote API's rejection, with its
//! numeric status code). Everything else — transport faults, malformed
//! replies, configuration problems — keeps its own variant so callers can
//! match on what actually went wrong.

use thiserror::Error;

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire-level field name (`symbol`, `quantity`, `timeInForce`, ...).
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input validation failure listing every violated field, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// True if any violation refers to the given field.
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(Violation::to_string)
            .collect::<Vec<_>>()
            .join(" || ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for ValidationError {}

/// Business or protocol rejection reported by the exchange.
///
/// Carries the exchange's own numeric code (e.g. Binance `-2019` for
/// insufficient margin). Never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("exchange rejected request: {code} - {message}")]
pub struct ExchangeError {
    pub code: i64,
    pub message: String,
}

impl ExchangeError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A nominally successful exchange reply that fails the result schema.
///
/// The gateway refuses to forward data it cannot account for, whether a
/// required field is missing or an unexpected one is present.
#[derive(Error, Debug)]
#[error("malformed exchange response: {reason}")]
pub struct ResponseError {
    pub reason: String,
}

impl ResponseError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
