//! Qualification-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

/// Errors from driving a qualification session.
///
/// `SessionComplete`, `NoCurrentQuestion` and `InvalidTransition` are
/// invariant violations: the caller asked for something the state machine
/// cannot do. They are never swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualificationError {
    #[error("Session {0} is already complete")]
    SessionComplete(SessionId),

    #[error("Session {session_id} has no question at product {product_index}, question {question_index}")]
    NoCurrentQuestion {
        session_id: SessionId,
        product_index: usize,
        question_index: usize,
    },

    #[error("Invalid session transition: {0}")]
    InvalidTransition(#[from] ValidationError),

    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl QualificationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            QualificationError::SessionComplete(_) => ErrorCode::SessionComplete,
            QualificationError::NoCurrentQuestion { .. } => ErrorCode::NoCurrentQuestion,
            QualificationError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            QualificationError::NotFound(_) => ErrorCode::SessionNotFound,
            QualificationError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// True for programmer errors against the state machine.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            QualificationError::SessionComplete(_)
                | QualificationError::NoCurrentQuestion { .. }
                | QualificationError::InvalidTransition(_)
        )
    }
}

impl From<DomainError> for QualificationError {
    fn from(err: DomainError) -> Self {
        QualificationError::Infrastructure(err.to_string())
    }
}
