//! Recorder that only logs.
//!
//! Used when no database is configured, so every answer still leaves a
//! trace in the structured log.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProductId, QuestionId, SessionId};
use crate::ports::SessionRecorder;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSessionRecorder;

impl TracingSessionRecorder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionRecorder for TracingSessionRecorder {
    async fn record_answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        response: bool,
    ) -> Result<(), DomainError> {
        tracing::info!(
            session_id = %session_id,
            question_id = %question_id,
            response,
            "Answer recorded"
        );
        Ok(())
    }

    async fn record_result(
        &self,
        session_id: &SessionId,
        qualified_product_id: Option<&ProductId>,
    ) -> Result<(), DomainError> {
        match qualified_product_id {
            Some(product_id) => tracing::info!(
                session_id = %session_id,
                product_id = %product_id,
                "Qualification result recorded"
            ),
            None => tracing::info!(
                session_id = %session_id,
                "Qualification result recorded with no qualifying product"
            ),
        }
        Ok(())
    }
}
