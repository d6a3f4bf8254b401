//! Result and error types for signup-probe.

use thiserror::Error;

/// Result type for signup-probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while driving a signup scenario
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A required selector never resolved
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that was looked up
        selector: String,
    },

    /// Operation timed out
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Notification text matched no known pattern
    #[error("Unexpected notification text: {text}")]
    UnexpectedNotificationText {
        /// Raw notification text
        text: String,
    },

    /// Lower-level browser-control failure
    #[error("Driver fault: {message}")]
    DriverFault {
        /// Error message
        message: String,
    },

    /// Invalid built-in configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    /// Create a driver fault
    #[must_use]
    pub fn driver_fault(message: impl Into<String>) -> Self {
        Self::DriverFault {
            message: message.into(),
        }
    }

    /// Create an element-not-found error
    #[must_use]
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error is a bounded wait running out
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = ProbeError::Timeout { ms: 10_000 };
        assert_eq!(err.to_string(), "Operation timed out after 10000ms");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_helpers() {
        let err = ProbeError::element_not_found(".auth-button");
        assert_eq!(err.to_string(), "Element not found: .auth-button");
        assert!(!err.is_timeout());

        let err = ProbeError::driver_fault("socket closed");
        assert!(matches!(err, ProbeError::DriverFault { .. }));
    }

    #[test]
    fn test_json_from() {
        let json_err = serde_json::from_str::<String>("{").unwrap_err();
        let err: ProbeError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
