//! Seed source error types.

use std::path::PathBuf;

use crate::domain::DomainError;

/// Errors that can occur when loading the base trip table.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid credentials for the remote catalogue
    #[error("unauthorized by remote catalogue")]
    Unauthorized,

    /// Rate limited by the remote catalogue
    #[error("rate limited by remote catalogue")]
    RateLimited,

    /// Remote catalogue returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a JSON table
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Failed to read a seed file
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A row of the table failed validation
    #[error("invalid trip at row {index}: {source}")]
    InvalidRecord { index: usize, source: DomainError },

    /// Two base trips share an id
    #[error("duplicate trip id: {0}")]
    DuplicateId(String),

    /// The table has no trips
    #[error("seed table is empty")]
    EmptySeed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(SourceError::EmptySeed.to_string(), "seed table is empty");
        assert_eq!(
            SourceError::DuplicateId("3".into()).to_string(),
            "duplicate trip id: 3"
        );

        let err = SourceError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = SourceError::InvalidRecord {
            index: 2,
            source: DomainError::ZeroPrice,
        };
        assert_eq!(err.to_string(), "invalid trip at row 2: price must be positive");

        let err = SourceError::Json {
            message: "expected array".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("expected array"));
    }
}
