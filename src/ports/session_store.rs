//! Session store port.
//!
//! Holds live qualification sessions between requests. Each session is
//! stored and replaced as a whole record. A read-modify-write of one session
//! must run under [`SessionStore::lock`] so that concurrent requests for the
//! same session apply one after another.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::qualification::QualificationSession;

/// Port for keeping sessions alive between answers.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert or replace a session.
    async fn save(&self, session: &QualificationSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found or already evicted.
    async fn find(&self, id: &SessionId) -> Result<Option<QualificationSession>, DomainError>;

    /// Remove a session. Returns whether it existed.
    async fn remove(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// Drop sessions not saved or read for longer than `max_idle`.
    ///
    /// Sessions currently locked are kept. Returns the number evicted.
    async fn evict_idle(&self, max_idle: Duration) -> Result<usize, DomainError>;

    /// Waits for exclusive use of one session. Held until the returned
    /// lock is dropped.
    async fn lock(&self, id: &SessionId) -> SessionLock;
}

type LockTable = Arc<StdMutex<HashMap<SessionId, Arc<Mutex<()>>>>>;

/// Keyed async locks, one per session id.
///
/// Entries exist only while someone holds or waits for them.
#[derive(Debug, Clone, Default)]
pub struct SessionLocks {
    table: LockTable,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, id: SessionId) -> SessionLock {
        let mutex = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            table.entry(id).or_default().clone()
        };
        let guard = mutex.lock_owned().await;
        SessionLock {
            id,
            guard: Some(guard),
            table: self.table.clone(),
        }
    }

    /// True while any caller holds or waits for `id`.
    pub fn is_held(&self, id: &SessionId) -> bool {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }
}

/// Exclusive hold on one session.
#[derive(Debug)]
pub struct SessionLock {
    id: SessionId,
    guard: Option<OwnedMutexGuard<()>>,
    table: LockTable,
}

impl SessionLock {
    pub fn session_id(&self) -> &SessionId {
        &self.id
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        self.guard.take();
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        // Waiters hold their own clone; only the table's copy left means idle.
        if table.get(&self.id).is_some_and(|m| Arc::strong_count(m) == 1) {
            table.remove(&self.id);
        }
    }
}
