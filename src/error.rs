//! Error types for wp-collection
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for wp-collection
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// Transport-level failure from reqwest
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code of the response
        status: u16,
        /// Response body, if it could be read
        body: String,
    },

    /// The endpoint URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Errors
    // ============================================================================
    /// The response body was not the expected shape
    #[error("Failed to decode response: {message}")]
    Decode {
        /// What was wrong with the body
        message: String,
    },

    // ============================================================================
    // Sorting Errors
    // ============================================================================
    /// A comparator could not order two members
    #[error("Sort failed: {message}")]
    Sort {
        /// What the comparator ran into
        message: String,
    },

    /// A member index past the end of the collection
    #[error("No member at index {index}")]
    MemberIndex {
        /// The offending index
        index: usize,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid construction-time configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What was misconfigured
        message: String,
    },
}

impl Error {
    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a sort error
    pub fn sort(message: impl Into<String>) -> Self {
        Self::Sort {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for wp-collection
pub type Result<T> = std::result::Result<T, Error>;
