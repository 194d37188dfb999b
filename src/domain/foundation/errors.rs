//! Error types for the domain layer.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// A value that cannot be accepted by a domain type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unknown tier '{0}'")]
    UnknownTier(String),

    #[error("Cannot move from {from} to {to}")]
    IllegalTransition { from: String, to: String },
}

impl ValidationError {
    pub fn illegal_transition(from: impl fmt::Debug, to: impl fmt::Debug) -> Self {
        ValidationError::IllegalTransition {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
        }
    }
}

/// Machine-readable classification carried by [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    InvalidCatalog,
    SessionNotFound,
    InvalidStateTransition,
    SessionComplete,
    NoCurrentQuestion,
    DatabaseError,
    RecorderError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidCatalog => "INVALID_CATALOG",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::SessionComplete => "SESSION_COMPLETE",
            ErrorCode::NoCurrentQuestion => "NO_CURRENT_QUESTION",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::RecorderError => "RECORDER_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported across a port boundary.
///
/// Adapters translate sqlx, filesystem and lock errors into this so the
/// domain and application layers never see driver types.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Wraps a driver error as `DATABASE_ERROR`, prefixed with what was
    /// being attempted.
    pub fn database(context: &str, source: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, source))
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::UnknownTier(_) => ErrorCode::ValidationFailed,
            ValidationError::IllegalTransition { .. } => ErrorCode::InvalidStateTransition,
        };
        DomainError::new(code, err.to_string())
    }
}
