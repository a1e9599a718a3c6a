//! Error types for the matching and estimation engine.

use std::fmt;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Error types for engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or incomplete estimation config
    #[error("Configuration validation failed: {0}")]
    ConfigValidation(#[from] ConfigValidationError),

    /// Category with no config entry and no "general" fallback
    #[error("Unknown category '{category}': no config entry and no general fallback")]
    UnknownCategory { category: String },

    /// Config source could not be read or parsed
    #[error("Configuration source error: {0}")]
    ConfigSource(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single violation found while validating an estimation config document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// JSON path of the offending field (e.g. `categories.hvac.basePrice`)
    pub path: String,
    /// Human-readable description of the violation
    pub message: String,
}

impl ConfigIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Aggregated config validation failure.
///
/// Validation collects every violation in the document before failing, so a
/// config author sees the full list instead of fixing fields one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

impl ConfigValidationError {
    pub fn new(issues: Vec<ConfigIssue>) -> Self {
        Self { issues }
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} issue(s): ", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigValidationError {}
