//! Error types for the odometer

use serde::{Deserialize, Serialize};

/// Errors raised at the odometer's input boundaries.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum OdometerError {
    /// Input that does not describe a number
    #[error("Invalid target: {input:?}")]
    InvalidTarget { input: String },

    /// A number the carry model cannot represent (negative or too large)
    #[error("Unsupported value: {value}")]
    UnsupportedValue { value: String },

    /// Configuration rejected by validation
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl OdometerError {
    pub(crate) fn invalid_target(input: impl Into<String>) -> Self {
        Self::InvalidTarget {
            input: input.into(),
        }
    }

    pub(crate) fn unsupported(value: impl std::fmt::Display) -> Self {
        Self::UnsupportedValue {
            value: value.to_string(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidTarget { .. } | Self::UnsupportedValue { .. } => "input",
            Self::InvalidConfig { .. } => "config",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for OdometerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
