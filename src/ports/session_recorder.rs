//! Session recorder port.
//!
//! Sink for per-question answers and the final outcome of a run. Recording
//! is best effort: a failure here is reported to the host and otherwise
//! ignored. It never changes session state and is never retried.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProductId, QuestionId, SessionId};

/// Port for persisting answers and outcomes.
#[async_trait]
pub trait SessionRecorder: Send + Sync {
    /// Record one answer.
    async fn record_answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        response: bool,
    ) -> Result<(), DomainError>;

    /// Record the final outcome. `None` means no product qualified.
    async fn record_result(
        &self,
        session_id: &SessionId,
        qualified_product_id: Option<&ProductId>,
    ) -> Result<(), DomainError>;
}
