//! GetQualificationHandler - Query handler for a session's current state.

use std::sync::Arc;

use super::view::QualificationView;
use crate::domain::foundation::SessionId;
use crate::domain::qualification::{QualificationEngine, QualificationError};
use crate::ports::SessionStore;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetQualificationQuery {
    pub session_id: SessionId,
}

/// Handler for reading sessions.
pub struct GetQualificationHandler {
    engine: QualificationEngine,
    store: Arc<dyn SessionStore>,
}

impl GetQualificationHandler {
    pub fn new(engine: QualificationEngine, store: Arc<dyn SessionStore>) -> Self {
        Self { engine, store }
    }

    pub async fn handle(
        &self,
        query: GetQualificationQuery,
    ) -> Result<QualificationView, QualificationError> {
        let session = self
            .store
            .find(&query.session_id)
            .await?
            .ok_or(QualificationError::NotFound(query.session_id))?;

        Ok(QualificationView::from_session(&self.engine, &session))
    }
}
