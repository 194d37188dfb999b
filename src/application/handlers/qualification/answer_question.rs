//! AnswerQuestionHandler - Command handler for answering the current question.

use std::sync::Arc;
use std::time::Duration;

use super::recording::TransitionRecorder;
use super::view::{QualificationOutcome, QualificationView};
use crate::domain::foundation::SessionId;
use crate::domain::qualification::{QualificationEngine, QualificationError};
use crate::ports::{SessionRecorder, SessionStore};

/// Command to answer the question a session is waiting on.
#[derive(Debug, Clone)]
pub struct AnswerQuestionCommand {
    pub session_id: SessionId,
    /// `true` means "yes", which disqualifies the current product.
    pub answer: bool,
}

/// Handler for answering questions.
pub struct AnswerQuestionHandler {
    engine: QualificationEngine,
    store: Arc<dyn SessionStore>,
    recorder: TransitionRecorder,
}

impl AnswerQuestionHandler {
    pub fn new(
        engine: QualificationEngine,
        store: Arc<dyn SessionStore>,
        recorder: Arc<dyn SessionRecorder>,
    ) -> Self {
        Self {
            engine,
            store,
            recorder: TransitionRecorder::new(recorder),
        }
    }

    /// How long to wait for recorder failures before answering.
    pub fn with_recorder_wait(mut self, wait: Duration) -> Self {
        self.recorder = self.recorder.with_report_window(wait);
        self
    }

    pub async fn handle(
        &self,
        cmd: AnswerQuestionCommand,
    ) -> Result<QualificationOutcome, QualificationError> {
        // Answers to one session apply one at a time
        let lock = self.store.lock(&cmd.session_id).await;

        let session = self
            .store
            .find(&cmd.session_id)
            .await?
            .ok_or(QualificationError::NotFound(cmd.session_id))?;

        let transition = self.engine.answer(&session, cmd.answer)?;
        self.store.save(&transition.session).await?;
        drop(lock);

        let recorder_failures = self.recorder.record(&transition).await;

        for event in &transition.events {
            tracing::debug!(session_id = %cmd.session_id, event = event.kind(), "Qualification event");
        }
        if transition.completed() {
            tracing::info!(
                session_id = %cmd.session_id,
                status = %transition.session.status(),
                "Qualification finished"
            );
        }

        Ok(QualificationOutcome {
            view: QualificationView::from_session(&self.engine, &transition.session),
            events: transition.events,
            recorder_failures,
        })
    }
}
