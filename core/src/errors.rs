//! Unified error types for the Remit navigator core.
//!
//! `FileError` is the failure shape of every remote file operation;
//! backends map their transport errors into it. `GateError` wraps a file
//! error with the two failure modes the operation gate itself can add
//! (rejected dispatch, forced release on timeout).

use std::time::Duration;

use thiserror::Error;

/// Errors reported by the remote file-access backend.
#[derive(Error, Debug)]
pub enum FileError {
    /// The named entry does not exist in the current remote directory.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Permission was denied for the requested operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A remote operation failed (transport error, server rejection, etc.).
    #[error("Operation failed: {0}")]
    OperationFailed(String),

    /// A low-level I/O error, e.g. while spooling a download to disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced when dispatching a remote request through the
/// [`OperationGate`](crate::navigator::OperationGate).
#[derive(Error, Debug)]
pub enum GateError {
    /// Another gated request is still in flight; this one was not issued.
    #[error("Another operation is in progress")]
    Busy,

    /// The request did not settle in time and the gate was force-released.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// The dispatched request settled with a failure.
    #[error(transparent)]
    File(#[from] FileError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_error_display() {
        let err = FileError::NotFound("docs".into());
        assert_eq!(err.to_string(), "Not found: docs");

        let err = FileError::PermissionDenied("secret.txt".into());
        assert_eq!(err.to_string(), "Permission denied: secret.txt");

        let err = FileError::OperationFailed("connection reset".into());
        assert_eq!(err.to_string(), "Operation failed: connection reset");
    }

    #[test]
    fn file_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let file_err: FileError = io_err.into();
        assert_eq!(file_err.to_string(), "I/O error: access denied");
    }

    #[test]
    fn gate_error_display() {
        let err = GateError::Busy;
        assert_eq!(err.to_string(), "Another operation is in progress");

        let err = GateError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Operation timed out after 30s");
    }

    #[test]
    fn gate_error_forwards_file_error_display() {
        let err: GateError = FileError::OperationFailed("rejected".to_string()).into();
        assert_eq!(err.to_string(), "Operation failed: rejected");
    }
}
