//! RestartQualificationHandler - Command handler for starting over.
//!
//! The old session is discarded and a brand-new one, with a new id, takes
//! its place. Answers already recorded under the old id stay where they are.

use std::sync::Arc;
use std::time::Duration;

use super::recording::TransitionRecorder;
use super::view::{QualificationOutcome, QualificationView};
use crate::domain::foundation::SessionId;
use crate::domain::qualification::{QualificationEngine, QualificationError};
use crate::ports::{SessionRecorder, SessionStore};

/// Command to restart a session.
#[derive(Debug, Clone)]
pub struct RestartQualificationCommand {
    pub session_id: SessionId,
}

/// Result of a restart.
#[derive(Debug, Clone)]
pub struct RestartQualificationResult {
    pub previous_session_id: SessionId,
    pub outcome: QualificationOutcome,
}

/// Handler for restarting sessions.
pub struct RestartQualificationHandler {
    engine: QualificationEngine,
    store: Arc<dyn SessionStore>,
    recorder: TransitionRecorder,
}

impl RestartQualificationHandler {
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
        cmd: RestartQualificationCommand,
    ) -> Result<RestartQualificationResult, QualificationError> {
        // Waits out any answer in flight for the old session
        let lock = self.store.lock(&cmd.session_id).await;
        if !self.store.remove(&cmd.session_id).await? {
            return Err(QualificationError::NotFound(cmd.session_id));
        }
        drop(lock);

        let transition = self.engine.restart(SessionId::new())?;
        self.store.save(&transition.session).await?;
        let recorder_failures = self.recorder.record(&transition).await;

        tracing::info!(
            previous_session_id = %cmd.session_id,
            session_id = %transition.session.id(),
            "Qualification restarted"
        );

        Ok(RestartQualificationResult {
            previous_session_id: cmd.session_id,
            outcome: QualificationOutcome {
                view: QualificationView::from_session(&self.engine, &transition.session),
                events: transition.events,
                recorder_failures,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::recorder::InMemorySessionRecorder;
    use crate::adapters::session_store::InMemorySessionStore;
    use crate::domain::catalog::{Catalog, CommonQuestionTable, Product, Tier};
    use crate::domain::foundation::{Percentage, ProductId};
    use crate::domain::qualification::QualificationStatus;

    fn engine() -> QualificationEngine {
        let products = vec![
            Product::new(ProductId::derived("A"), "A", Tier::Preferred).with_question_texts(["a1"]),
            Product::new(ProductId::derived("B"), "B", Tier::Standard).with_question_texts(["b1"]),
        ];
        let catalog = Catalog::new(products, CommonQuestionTable::new()).unwrap();
        QualificationEngine::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn replaces_session_with_fresh_one() {
        let engine = engine();
        let store = Arc::new(InMemorySessionStore::new());
        let mut session = engine.start(SessionId::new()).unwrap().session;
        session = engine.answer(&session, true).unwrap().session;
        store.save(&session).await.unwrap();
        let handler = RestartQualificationHandler::new(
            engine,
            store.clone(),
            Arc::new(InMemorySessionRecorder::new()),
        );

        let result = handler
            .handle(RestartQualificationCommand {
                session_id: *session.id(),
            })
            .await
            .unwrap();

        let view = result.outcome.view;
        assert_eq!(result.previous_session_id, *session.id());
        assert_ne!(view.session_id, *session.id());
        assert_eq!(view.status, QualificationStatus::InProgress);
        assert_eq!(view.progress, Percentage::ZERO);
        assert_eq!(view.current_question.unwrap().product_name, "A");
        assert!(store.find(session.id()).await.unwrap().is_none());
        assert!(store.find(&view.session_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn restarting_finished_session_is_allowed() {
        let engine = engine();
        let store = Arc::new(InMemorySessionStore::new());
        let mut session = engine.start(SessionId::new()).unwrap().session;
        session = engine.answer(&session, false).unwrap().session;
        assert!(session.is_complete());
        store.save(&session).await.unwrap();
        let handler = RestartQualificationHandler::new(
            engine,
            store,
            Arc::new(InMemorySessionRecorder::new()),
        );

        let result = handler
            .handle(RestartQualificationCommand {
                session_id: *session.id(),
            })
            .await
            .unwrap();
        assert!(!result.outcome.view.status.is_complete());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = RestartQualificationHandler::new(
            engine(),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemorySessionRecorder::new()),
        );
        let id = SessionId::new();

        let err = handler
            .handle(RestartQualificationCommand { session_id: id })
            .await
            .unwrap_err();
        assert_eq!(err, QualificationError::NotFound(id));
    }

    #[tokio::test]
    async fn restart_waits_for_answer_in_flight() {
        let engine = engine();
        let store = Arc::new(InMemorySessionStore::new());
        let session = engine.start(SessionId::new()).unwrap().session;
        store.save(&session).await.unwrap();
        let id = *session.id();
        let handler = RestartQualificationHandler::new(
            engine,
            store.clone(),
            Arc::new(InMemorySessionRecorder::new()),
        );

        let lock = store.lock(&id).await;
        let held = {
            let store = store.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                // Still present: the restart is queued behind the lock
                assert!(store.find(&id).await.unwrap().is_some());
                drop(lock);
            }
        };
        let (result, ()) = tokio::join!(
            handler.handle(RestartQualificationCommand { session_id: id }),
            held
        );

        assert_eq!(result.unwrap().previous_session_id, id);
        assert!(store.find(&id).await.unwrap().is_none());
    }
}
