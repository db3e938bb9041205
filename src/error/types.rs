//! Error types for audit logging.

use thiserror::Error;

/// Main error type for audit logging operations.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O errors from file creation, appends, or rotation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failures decoding a stored compressed message back to text.
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// The writer mutex was poisoned by a panicking thread.
    #[error("Lock error: {message}")]
    Lock { message: String },

    /// Operation is recognized but not implemented.
    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String },
}

/// Result type alias for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AuditError = io.into();
        assert!(matches!(err, AuditError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_unsupported_display() {
        let err = AuditError::Unsupported {
            operation: "archive_logs".to_string(),
        };
        assert_eq!(err.to_string(), "Operation not supported: archive_logs");
    }
}
