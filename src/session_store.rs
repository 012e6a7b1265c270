//! The in-memory registry of browser sessions.
//!
//! Each logged in browser gets its own [SessionEntry] behind its own mutex.
//! Handlers lock the entry for the whole of a bank operation, so checking the
//! balance and debiting it cannot interleave with another request from the
//! same browser. The map itself is behind a separate mutex that is only held
//! long enough to look up, add or remove an entry.

use std::{
    collections::HashMap,
    fmt::Display,
    sync::{Arc, Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{
    Error,
    bank::{BankSession, TransferWizard},
};

/// An opaque identifier for a browser session, stored in the auth cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the server keeps for one browser.
#[derive(Debug)]
pub struct SessionEntry {
    /// The user, balance and transactions.
    pub bank: BankSession,
    /// The progress through the transfer flow.
    pub transfer: TransferWizard,
}

impl SessionEntry {
    /// Create an entry for `bank` with an empty transfer form.
    pub fn new(bank: BankSession) -> Self {
        Self {
            bank,
            transfer: TransferWizard::default(),
        }
    }
}

/// A shared reference to one [SessionEntry].
///
/// Route handlers behind the auth guard receive this as a request extension.
#[derive(Debug, Clone)]
pub struct SessionHandle(Arc<Mutex<SessionEntry>>);

impl SessionHandle {
    fn new(entry: SessionEntry) -> Self {
        Self(Arc::new(Mutex::new(entry)))
    }

    /// Lock the session for exclusive access.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if another thread panicked while holding the lock.
    pub fn lock(&self) -> Result<MutexGuard<'_, SessionEntry>, Error> {
        self.0.lock().map_err(|error| {
            tracing::error!("could not acquire session lock: {error}");
            Error::SessionLockError
        })
    }
}

#[derive(Debug)]
struct StoredSession {
    handle: SessionHandle,
    last_active: OffsetDateTime,
}

/// Maps session IDs to sessions.
///
/// Cloning the store gives another reference to the same sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, StoredSession>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entry` under a new ID and return the ID and a handle to the entry.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the store's lock is poisoned.
    pub fn insert(&self, entry: SessionEntry) -> Result<(SessionId, SessionHandle), Error> {
        let id = SessionId::new();
        let handle = SessionHandle::new(entry);

        self.lock()?.insert(
            id,
            StoredSession {
                handle: handle.clone(),
                last_active: OffsetDateTime::now_utc(),
            },
        );

        tracing::debug!("created session {id}");

        Ok((id, handle))
    }

    /// Get the session for `id` and mark it as active.
    ///
    /// # Errors
    /// - [Error::SessionNotFound] if there is no session for `id`.
    /// - [Error::SessionLockError] if the store's lock is poisoned.
    pub fn get(&self, id: SessionId) -> Result<SessionHandle, Error> {
        let mut sessions = self.lock()?;
        let stored = sessions.get_mut(&id).ok_or(Error::SessionNotFound)?;
        stored.last_active = OffsetDateTime::now_utc();

        Ok(stored.handle.clone())
    }

    /// Remove the session for `id`, returning its handle if it existed.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the store's lock is poisoned.
    pub fn remove(&self, id: SessionId) -> Result<Option<SessionHandle>, Error> {
        let removed = self.lock()?.remove(&id).map(|stored| stored.handle);

        if removed.is_some() {
            tracing::debug!("removed session {id}");
        }

        Ok(removed)
    }

    /// Remove every session that has not been used for longer than `max_idle`.
    ///
    /// Returns the number of sessions removed.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the store's lock is poisoned.
    pub fn purge_idle(&self, max_idle: Duration) -> Result<usize, Error> {
        let cutoff = OffsetDateTime::now_utc() - max_idle;
        let mut sessions = self.lock()?;
        let count_before = sessions.len();

        sessions.retain(|_, stored| stored.last_active >= cutoff);

        Ok(count_before - sessions.len())
    }

    /// The number of sessions in the store.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the store's lock is poisoned.
    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.lock()?.len())
    }

    /// Whether the store has no sessions.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the store's lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, StoredSession>>, Error> {
        self.sessions.lock().map_err(|error| {
            tracing::error!("could not acquire session store lock: {error}");
            Error::SessionLockError
        })
    }
}
