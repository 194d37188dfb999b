//! Hands transitions to the session recorder without holding up the flow.
//!
//! Each recording runs on its own task. The handler waits at most
//! `report_within` for it: failures seen by then go back to the caller,
//! anything slower finishes in the background and is only logged.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ProductId, QuestionId, SessionId};
use crate::domain::qualification::Transition;
use crate::ports::SessionRecorder;

/// Default time a handler waits for the recorder before answering.
pub const DEFAULT_RECORDER_WAIT: Duration = Duration::from_millis(250);

/// Which recorder call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecorderOperation {
    RecordAnswer,
    RecordResult,
}

/// A recorder failure reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecorderFailure {
    pub operation: RecorderOperation,
    pub message: String,
}

impl RecorderFailure {
    fn new(operation: RecorderOperation, error: &DomainError) -> Self {
        Self {
            operation,
            message: error.to_string(),
        }
    }
}

/// What a transition asks the recorder to write.
#[derive(Debug, Clone)]
struct RecordingJob {
    session_id: SessionId,
    answer: Option<(QuestionId, bool)>,
    /// `Some` when the run ended; the inner value is the qualified product.
    result: Option<Option<ProductId>>,
}

impl RecordingJob {
    fn from_transition(transition: &Transition) -> Option<Self> {
        let answer = transition
            .answered
            .as_ref()
            .map(|answered| (answered.question_id, answered.answer));
        let result = transition
            .completed()
            .then(|| transition.session.qualified_product().copied());

        if answer.is_none() && result.is_none() {
            return None;
        }
        Some(Self {
            session_id: *transition.session.id(),
            answer,
            result,
        })
    }

    async fn run(self, recorder: Arc<dyn SessionRecorder>) -> Vec<RecorderFailure> {
        let session_id = self.session_id;
        let mut failures = Vec::new();

        if let Some((question_id, response)) = self.answer {
            if let Err(e) = recorder.record_answer(&session_id, &question_id, response).await {
                tracing::warn!(
                    session_id = %session_id,
                    question_id = %question_id,
                    error = %e,
                    "Failed to record answer"
                );
                failures.push(RecorderFailure::new(RecorderOperation::RecordAnswer, &e));
            }
        }

        if let Some(qualified) = self.result {
            if let Err(e) = recorder.record_result(&session_id, qualified.as_ref()).await {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "Failed to record qualification result"
                );
                failures.push(RecorderFailure::new(RecorderOperation::RecordResult, &e));
            }
        }

        failures
    }
}

/// Dispatches recorder writes for the qualification handlers.
#[derive(Clone)]
pub struct TransitionRecorder {
    recorder: Arc<dyn SessionRecorder>,
    report_within: Duration,
}

impl TransitionRecorder {
    pub fn new(recorder: Arc<dyn SessionRecorder>) -> Self {
        Self {
            recorder,
            report_within: DEFAULT_RECORDER_WAIT,
        }
    }

    pub fn with_report_window(mut self, report_within: Duration) -> Self {
        self.report_within = report_within;
        self
    }

    /// Records the answer and, when the run ended, the result.
    ///
    /// Returns the failures observed within the report window. The session
    /// is never affected and nothing is retried.
    pub async fn record(&self, transition: &Transition) -> Vec<RecorderFailure> {
        let Some(job) = RecordingJob::from_transition(transition) else {
            return Vec::new();
        };
        let session_id = job.session_id;
        let task = tokio::spawn(job.run(self.recorder.clone()));

        match tokio::time::timeout(self.report_within, task).await {
            Ok(Ok(failures)) => failures,
            Ok(Err(e)) => {
                tracing::warn!(session_id = %session_id, error = %e, "Recorder task aborted");
                Vec::new()
            }
            Err(_) => {
                tracing::debug!(
                    session_id = %session_id,
                    wait_ms = self.report_within.as_millis() as u64,
                    "Recorder still running, continuing without it"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::recorder::InMemorySessionRecorder;
    use crate::domain::catalog::{Catalog, CommonQuestionTable, Product, Tier};
    use crate::domain::qualification::QualificationEngine;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Never finishes a write.
    #[derive(Default)]
    struct StalledRecorder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SessionRecorder for StalledRecorder {
        async fn record_answer(
            &self,
            _session_id: &SessionId,
            _question_id: &QuestionId,
            _response: bool,
        ) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }

        async fn record_result(
            &self,
            _session_id: &SessionId,
            _qualified_product_id: Option<&ProductId>,
        ) -> Result<(), DomainError> {
            std::future::pending().await
        }
    }

    fn engine() -> QualificationEngine {
        let products = vec![
            Product::new(ProductId::derived("A"), "A", Tier::Preferred)
                .with_question_texts(["a1", "a2"]),
        ];
        let catalog = Catalog::new(products, CommonQuestionTable::new()).unwrap();
        QualificationEngine::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn start_without_result_records_nothing() {
        let recorder = Arc::new(InMemorySessionRecorder::new());
        let transition = engine().start(SessionId::new()).unwrap();

        let failures = TransitionRecorder::new(recorder.clone()).record(&transition).await;

        assert!(failures.is_empty());
        assert!(recorder.answers().is_empty());
        assert!(recorder.results().is_empty());
    }

    #[tokio::test]
    async fn records_answer_then_result_on_completion() {
        let engine = engine();
        let recorder = Arc::new(InMemorySessionRecorder::new());
        let dispatch = TransitionRecorder::new(recorder.clone());
        let session = engine.start(SessionId::new()).unwrap().session;

        let first = engine.answer(&session, false).unwrap();
        assert!(dispatch.record(&first).await.is_empty());
        assert_eq!(recorder.answers().len(), 1);
        assert!(recorder.results().is_empty());

        let second = engine.answer(&first.session, false).unwrap();
        assert!(dispatch.record(&second).await.is_empty());
        assert_eq!(recorder.answers().len(), 2);
        assert_eq!(
            recorder.results()[0].qualified_product_id,
            Some(ProductId::derived("A"))
        );
    }

    #[tokio::test]
    async fn quick_failures_are_reported() {
        let engine = engine();
        let recorder = Arc::new(InMemorySessionRecorder::failing());
        let mut session = engine.start(SessionId::new()).unwrap().session;
        session = engine.answer(&session, false).unwrap().session;
        let last = engine.answer(&session, false).unwrap();

        let failures = TransitionRecorder::new(recorder).record(&last).await;

        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].operation, RecorderOperation::RecordAnswer);
        assert_eq!(failures[1].operation, RecorderOperation::RecordResult);
    }

    #[tokio::test]
    async fn stalled_recorder_is_left_behind() {
        let engine = engine();
        let recorder = Arc::new(StalledRecorder::default());
        let dispatch = TransitionRecorder::new(recorder.clone())
            .with_report_window(Duration::from_millis(20));
        let session = engine.start(SessionId::new()).unwrap().session;
        let transition = engine.answer(&session, false).unwrap();

        let failures = tokio::time::timeout(Duration::from_secs(2), dispatch.record(&transition))
            .await
            .expect("recording must not wait on a stalled recorder");

        assert!(failures.is_empty());
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 1);
    }
}
