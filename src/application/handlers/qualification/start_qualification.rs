//! StartQualificationHandler - Command handler for beginning a run.

use std::sync::Arc;
use std::time::Duration;

use super::recording::TransitionRecorder;
use super::view::{QualificationOutcome, QualificationView};
use crate::domain::foundation::SessionId;
use crate::domain::qualification::{QualificationEngine, QualificationError};
use crate::ports::{SessionRecorder, SessionStore};

/// Handler for starting qualification sessions.
pub struct StartQualificationHandler {
    engine: QualificationEngine,
    store: Arc<dyn SessionStore>,
    recorder: TransitionRecorder,
}

impl StartQualificationHandler {
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

    pub async fn handle(&self) -> Result<QualificationOutcome, QualificationError> {
        let transition = self.engine.start(SessionId::new())?;
        self.store.save(&transition.session).await?;

        // A catalog can end the run before any question is asked.
        let recorder_failures = self.recorder.record(&transition).await;

        tracing::info!(
            session_id = %transition.session.id(),
            status = %transition.session.status(),
            "Qualification started"
        );

        Ok(QualificationOutcome {
            view: QualificationView::from_session(&self.engine, &transition.session),
            events: transition.events,
            recorder_failures,
        })
    }
}
