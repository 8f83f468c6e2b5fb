//! Error types and handling for the travel concierge
//!
//! Two layers live here: [`ConciergeError`] for the application itself
//! (configuration and argument validation), and [`LookupError`] for the
//! outcome of a single upstream lookup. Tools never surface either as an
//! error to the agent layer; they render them to text at the boundary.

use thiserror::Error;

/// Main error type for the travel concierge
#[derive(Error, Debug)]
pub enum ConciergeError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl ConciergeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ConciergeError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            ConciergeError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

/// Outcome of a failed upstream lookup (geocoding, forecast, place search)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The free-text location could not be geocoded
    #[error("location not found: {location}")]
    NotFound { location: String },

    /// The upstream API answered with a non-success status
    #[error("upstream returned HTTP {status}")]
    Upstream { status: u16 },

    /// The request exceeded its fixed deadline
    #[error("request timed out")]
    Timeout,

    /// Anything else: transport failures, malformed bodies
    #[error("{0}")]
    Failure(String),
}

impl LookupError {
    pub fn not_found<S: Into<String>>(location: S) -> Self {
        Self::NotFound {
            location: location.into(),
        }
    }

    pub fn failure<S: Into<String>>(message: S) -> Self {
        Self::Failure(message.into())
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout
        } else if let Some(status) = err.status() {
            LookupError::Upstream {
                status: status.as_u16(),
            }
        } else {
            LookupError::Failure(err.to_string())
        }
    }
}
