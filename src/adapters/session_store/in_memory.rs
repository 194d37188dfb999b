//! In-memory session store.
//!
//! Keeps every live session in a HashMap behind an async RwLock. Sessions
//! are lost on restart and not shared between processes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::qualification::QualificationSession;
use crate::ports::{SessionLock, SessionLocks, SessionStore};

/// In-memory session store for single-server deployments and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, StoredSession>>>,
    locks: SessionLocks,
}

/// A session and when it was last saved or read.
#[derive(Debug, Clone)]
struct StoredSession {
    session: QualificationSession,
    last_touched: Instant,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, session: &QualificationSession) -> Result<(), DomainError> {
        self.sessions.write().await.insert(
            *session.id(),
            StoredSession {
                session: session.clone(),
                last_touched: Instant::now(),
            },
        );
        Ok(())
    }

    async fn find(&self, id: &SessionId) -> Result<Option<QualificationSession>, DomainError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.get_mut(id).map(|stored| {
            stored.last_touched = Instant::now();
            stored.session.clone()
        }))
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn evict_idle(&self, max_idle: Duration) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, stored| {
            stored.last_touched.elapsed() < max_idle || self.locks.is_held(id)
        });
        let evicted = before - sessions.len();

        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        Ok(evicted)
    }

    async fn lock(&self, id: &SessionId) -> SessionLock {
        self.locks.acquire(*id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Catalog, CommonQuestionTable, Product, Tier};
    use crate::domain::foundation::ProductId;
    use crate::domain::qualification::QualificationEngine;

    fn engine() -> QualificationEngine {
        let product = Product::new(ProductId::derived("A"), "A", Tier::Preferred)
            .with_question_texts(["a1", "a2"]);
        let catalog = Catalog::new(vec![product], CommonQuestionTable::new()).unwrap();
        QualificationEngine::new(Arc::new(catalog))
    }

    fn new_session(engine: &QualificationEngine) -> QualificationSession {
        engine.start(SessionId::new()).unwrap().session
    }

    #[tokio::test]
    async fn save_then_find_returns_session() {
        let store = InMemorySessionStore::new();
        let session = new_session(&engine());

        store.save(&session).await.unwrap();

        assert_eq!(store.find(session.id()).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn find_unknown_returns_none() {
        let store = InMemorySessionStore::new();
        assert!(store.find(&SessionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_whole_record() {
        let engine = engine();
        let store = InMemorySessionStore::new();
        let session = new_session(&engine);
        store.save(&session).await.unwrap();

        let next = engine.answer(&session, false).unwrap().session;
        store.save(&next).await.unwrap();

        let found = store.find(session.id()).await.unwrap().unwrap();
        assert_eq!(found.current_question_index(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn remove_reports_whether_present() {
        let store = InMemorySessionStore::new();
        let session = new_session(&engine());
        store.save(&session).await.unwrap();

        assert!(store.remove(session.id()).await.unwrap());
        assert!(!store.remove(session.id()).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn evict_idle_drops_only_stale_sessions() {
        let engine = engine();
        let store = InMemorySessionStore::new();
        store.save(&new_session(&engine)).await.unwrap();
        store.save(&new_session(&engine)).await.unwrap();

        assert_eq!(store.evict_idle(Duration::from_secs(3600)).await.unwrap(), 0);
        assert_eq!(store.len().await, 2);

        assert_eq!(store.evict_idle(Duration::ZERO).await.unwrap(), 2);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn evict_idle_keeps_locked_sessions() {
        let engine = engine();
        let store = InMemorySessionStore::new();
        let busy = new_session(&engine);
        store.save(&busy).await.unwrap();
        store.save(&new_session(&engine)).await.unwrap();

        let lock = store.lock(busy.id()).await;
        assert_eq!(store.evict_idle(Duration::ZERO).await.unwrap(), 1);
        assert!(store.find(busy.id()).await.unwrap().is_some());

        drop(lock);
        assert_eq!(store.evict_idle(Duration::ZERO).await.unwrap(), 1);
        assert!(store.is_empty().await);
    }
}
