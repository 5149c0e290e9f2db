//! Error types for the nasdir library.

use std::time::Duration;

use thiserror::Error;

use crate::api::ApiErrorCode;

/// Coarse classification of a [`NasError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request, caught before any network access.
    Validation,
    /// The NAS explicitly refused the request, or a business rule failed.
    Integration,
    /// Transport-level failure talking to the NAS.
    Connectivity,
    /// Anything else.
    Unexpected,
}

/// Main error type for nasdir operations.
#[derive(Error, Debug)]
pub enum NasError {
    /// Request payload failed a pre-flight rule.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// NAS API returned `success: false`.
    #[error("API error: {code} - {message}")]
    Api {
        code: i64,
        message: String,
        detail: serde_json::Value,
    },

    /// Requested shared folders are not exported by the NAS.
    #[error("Shared folder not found: {0:?}")]
    SharedFolderNotFound(Vec<String>),

    /// HTTP request failed with status code.
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Response parsed but did not have the expected shape.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// No response within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

impl NasError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        NasError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Build an API error from a remote error code and its raw payload.
    pub fn api(code: i64, detail: serde_json::Value) -> Self {
        NasError::Api {
            code,
            message: ApiErrorCode::from(code).description().to_string(),
            detail,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NasError::Validation { .. } => ErrorKind::Validation,
            NasError::Api { .. } | NasError::SharedFolderNotFound(_) => ErrorKind::Integration,
            NasError::HttpError(_)
            | NasError::RequestError(_)
            | NasError::JsonError(_)
            | NasError::InvalidResponse(_)
            | NasError::Timeout(_) => ErrorKind::Connectivity,
            NasError::Config(_) | NasError::Custom(_) => ErrorKind::Unexpected,
        }
    }

    /// True only for the remote "no such file or directory" answer.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NasError::Api { code, .. } if ApiErrorCode::from(*code) == ApiErrorCode::NoSuchFile
        )
    }

    /// HTTP status a routing layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 422,
            ErrorKind::Integration => 400,
            ErrorKind::Connectivity => 503,
            ErrorKind::Unexpected => 500,
        }
    }
}

/// Result type alias for nasdir operations.
pub type Result<T> = std::result::Result<T, NasError>;
