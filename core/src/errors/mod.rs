//! Domain-specific error types and error handling.

use thiserror::Error;

/// Errors raised by `CodeStore` primitives
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Access code already exists: {code}")]
    AlreadyExists { code: String },

    #[error("Access code not found: {code}")]
    NotFound { code: String },

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    /// Shorthand for a transport or storage failure
    pub fn unavailable(message: impl ToString) -> Self {
        StoreError::Unavailable {
            message: message.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned across the core boundary by administrative operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessCodeError {
    #[error("Invalid access code format: {code:?}")]
    InvalidFormat { code: String },

    #[error("Access code not found: {code}")]
    NotFound { code: String },

    #[error("Access code already exists: {code}")]
    AlreadyExists { code: String },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },
}

impl AccessCodeError {
    /// Stable identifier for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessCodeError::InvalidFormat { .. } => "INVALID_FORMAT",
            AccessCodeError::NotFound { .. } => "NOT_FOUND",
            AccessCodeError::AlreadyExists { .. } => "ALREADY_EXISTS",
            AccessCodeError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
        }
    }

    /// Whether the failure came from infrastructure rather than the request
    pub fn is_store_failure(&self) -> bool {
        matches!(self, AccessCodeError::StoreUnavailable { .. })
    }
}

impl From<StoreError> for AccessCodeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists { code } => AccessCodeError::AlreadyExists { code },
            StoreError::NotFound { code } => AccessCodeError::NotFound { code },
            StoreError::Unavailable { message } => AccessCodeError::StoreUnavailable { message },
        }
    }
}

pub type AccessCodeResult<T> = Result<T, AccessCodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_conversion() {
        let err: AccessCodeError = StoreError::NotFound { code: "123456".into() }.into();
        assert_eq!(err, AccessCodeError::NotFound { code: "123456".into() });
        assert_eq!(err.error_code(), "NOT_FOUND");

        let err: AccessCodeError = StoreError::unavailable("connection reset").into();
        assert!(err.is_store_failure());
        assert_eq!(err.to_string(), "Store unavailable: connection reset");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AccessCodeError::InvalidFormat { code: "12".into() }.error_code(),
            "INVALID_FORMAT"
        );
        assert_eq!(
            AccessCodeError::AlreadyExists { code: "123456".into() }.error_code(),
            "ALREADY_EXISTS"
        );
    }
}
