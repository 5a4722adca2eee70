//! Error types for fetching DHIS2 users.

use thiserror::Error;

/// Errors that can occur while fetching and flattening users.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The connection configuration is incomplete or unusable.
    #[error("invalid connection configuration: {0}")]
    Configuration(String),

    /// The server answered with a non-success status. The body is not read.
    #[error("HTTP {status} {status_text}")]
    Http {
        /// The response status code.
        status: u16,
        /// The status reason phrase, empty if the code has none.
        status_text: String,
    },

    /// The request could not be sent or did not complete in time.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body didn't have the expected shape.
    #[error("unexpected response body: {0}")]
    Parse(String),
}

impl FetchError {
    /// Status code carried by an HTTP error.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::StatusCode> for FetchError {
    fn from(status: reqwest::StatusCode) -> Self {
        FetchError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
        }
    }
}
