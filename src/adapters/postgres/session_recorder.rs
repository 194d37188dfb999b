//! PostgreSQL implementation of SessionRecorder.
//!
//! Appends to `user_responses` and `qualification_results`. Rows are never
//! updated; a restarted run writes under its new session id.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, ProductId, QuestionId, SessionId, Timestamp,
};
use crate::ports::SessionRecorder;

/// PostgreSQL implementation of SessionRecorder.
#[derive(Clone)]
pub struct PostgresSessionRecorder {
    pool: PgPool,
}

impl PostgresSessionRecorder {
    /// Creates a new PostgresSessionRecorder.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRecorder for PostgresSessionRecorder {
    async fn record_answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        response: bool,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_responses (
                id, session_id, question_id, response, answered_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session_id.as_uuid())
        .bind(question_id.as_uuid())
        .bind(response)
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::RecorderError,
                format!("Failed to insert response: {}", e),
            )
            .with_detail("session_id", session_id.to_string())
        })?;

        Ok(())
    }

    async fn record_result(
        &self,
        session_id: &SessionId,
        qualified_product_id: Option<&ProductId>,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO qualification_results (
                id, session_id, qualified_product_id, completed_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session_id.as_uuid())
        .bind(qualified_product_id.map(|id| *id.as_uuid()))
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::RecorderError,
                format!("Failed to insert qualification result: {}", e),
            )
            .with_detail("session_id", session_id.to_string())
        })?;

        Ok(())
    }
}
