//! Source error types.

use tally_shared::AppError;
use thiserror::Error;

/// Errors raised while fetching a report payload.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Body is not a report payload.
    #[error("Malformed upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Fixture could not be read.
    #[error("Fixture read failed: {0}")]
    Io(#[from] std::io::Error),

    /// No fixture for the requested report.
    #[error("No payload available: {0}")]
    NotFound(String),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound(what) => Self::NotFound(what),
            other => Self::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_app_error() {
        let err: AppError = SourceError::Status(503).into();
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.to_string(), "Upstream error: Upstream returned status 503");

        let err: AppError = SourceError::NotFound("cash-book".into()).into();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_decode_error_message() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SourceError::from(err);
        assert!(err.to_string().starts_with("Malformed upstream payload"));
    }
}
