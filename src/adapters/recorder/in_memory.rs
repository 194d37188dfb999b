//! In-memory session recorder for testing.
//!
//! Captures every call so tests can assert on what the application layer
//! recorded. Can be switched into a failing mode to exercise the
//! report-and-continue path.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. Its inspection helpers use
//! `.expect()` on lock operations and will panic if a lock is poisoned.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProductId, QuestionId, SessionId};
use crate::ports::SessionRecorder;

/// One captured `record_answer` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAnswer {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    pub response: bool,
}

/// One captured `record_result` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedResult {
    pub session_id: SessionId,
    pub qualified_product_id: Option<ProductId>,
}

/// In-memory recorder for testing.
pub struct InMemorySessionRecorder {
    answers: RwLock<Vec<RecordedAnswer>>,
    results: RwLock<Vec<RecordedResult>>,
    fail: AtomicBool,
}

impl InMemorySessionRecorder {
    pub fn new() -> Self {
        Self {
            answers: RwLock::new(Vec::new()),
            results: RwLock::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    /// A recorder whose every call fails without capturing anything.
    pub fn failing() -> Self {
        let recorder = Self::new();
        recorder.set_failing(true);
        recorder
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    // === Test Helpers ===

    /// Returns all captured answers in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn answers(&self) -> Vec<RecordedAnswer> {
        self.answers
            .read()
            .expect("InMemorySessionRecorder: answers lock poisoned")
            .clone()
    }

    /// Returns all captured results in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn results(&self) -> Vec<RecordedResult> {
        self.results
            .read()
            .expect("InMemorySessionRecorder: results lock poisoned")
            .clone()
    }

    /// Returns captured answers for one session.
    pub fn answers_for(&self, session_id: &SessionId) -> Vec<RecordedAnswer> {
        self.answers()
            .into_iter()
            .filter(|a| &a.session_id == session_id)
            .collect()
    }

    fn check_failing(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::RecorderError,
                "Simulated recorder failure",
            ));
        }
        Ok(())
    }

    fn lock_error() -> DomainError {
        DomainError::new(ErrorCode::RecorderError, "Recorder lock poisoned")
    }
}

impl Default for InMemorySessionRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRecorder for InMemorySessionRecorder {
    async fn record_answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        response: bool,
    ) -> Result<(), DomainError> {
        self.check_failing()?;
        self.answers
            .write()
            .map_err(|_| Self::lock_error())?
            .push(RecordedAnswer {
                session_id: *session_id,
                question_id: *question_id,
                response,
            });
        Ok(())
    }

    async fn record_result(
        &self,
        session_id: &SessionId,
        qualified_product_id: Option<&ProductId>,
    ) -> Result<(), DomainError> {
        self.check_failing()?;
        self.results
            .write()
            .map_err(|_| Self::lock_error())?
            .push(RecordedResult {
                session_id: *session_id,
                qualified_product_id: qualified_product_id.copied(),
            });
        Ok(())
    }
}
