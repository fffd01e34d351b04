//! Error types for the Rollcall plugin.
//!
//! [`RollcallError`] is the crate-wide error with a [`Result`] alias. Fetch
//! failures get their own [`FetchFailure`] type because they travel inside
//! events and directory state, which requires `Clone` and `PartialEq`.

use thiserror::Error;

/// The main error type for Rollcall plugin operations.
#[derive(Debug, Error)]
pub enum RollcallError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Loading the user directory failed.
    #[error(transparent)]
    Fetch(#[from] FetchFailure),
}

/// Reasons a directory fetch can end without data.
///
/// Every variant moves the directory store to `Failed`; none of them is
/// retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The endpoint answered with a non-2xx status.
    #[error("directory endpoint returned HTTP {0}")]
    Status(u16),

    /// The body was not a JSON array of `{ id, name, .. }` objects.
    #[error("malformed directory payload: {0}")]
    Malformed(String),

    /// The host could not perform the request at all.
    #[error("request failed: {0}")]
    Host(String),

    /// The in-flight request was cancelled before it completed.
    #[error("request cancelled")]
    Cancelled,

    /// The user refused the `WebAccess` permission.
    #[error("web access permission denied")]
    PermissionDenied,
}

/// A specialized `Result` type for Rollcall operations.
pub type Result<T> = std::result::Result<T, RollcallError>;

#[cfg(test)]
mod tests {
    use super::{FetchFailure, RollcallError};

    #[test]
    fn fetch_failures_read_as_reasons() {
        assert_eq!(FetchFailure::Status(503).to_string(), "directory endpoint returned HTTP 503");
        assert_eq!(FetchFailure::Cancelled.to_string(), "request cancelled");
        assert_eq!(
            FetchFailure::PermissionDenied.to_string(),
            "web access permission denied"
        );
    }

    #[test]
    fn fetch_failure_converts_transparently() {
        let err: RollcallError = FetchFailure::Host("connection refused".to_string()).into();
        assert_eq!(err.to_string(), "request failed: connection refused");
    }
}
