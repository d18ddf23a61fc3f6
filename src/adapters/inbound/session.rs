//! Session Store
//!
//! Holds one SessionState per active browser session, keyed by the UUID
//! carried in the `sid` cookie. Idle sessions are reclaimed after a TTL.

use crate::domain::entities::SessionState;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// A stored session plus its activity timestamp.
#[derive(Debug, Clone)]
struct SessionEntry {
    state: SessionState,
    last_seen: Instant,
}

/// DashMap-backed session store.
///
/// Visitors without a valid cookie get a fresh default state; every load
/// or save refreshes the idle clock.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, SessionEntry>>,
    idle_ttl: Duration,
}

impl SessionStore {
    /// Create a new store; sessions expire after `idle_ttl` without use.
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            idle_ttl,
        }
    }

    /// Load the state for a session, or a default for unknown/absent ids.
    pub fn load(&self, id: Uuid) -> SessionState {
        match self.sessions.get_mut(&id) {
            Some(mut entry) => {
                entry.last_seen = Instant::now();
                entry.state.clone()
            }
            None => SessionState::new(),
        }
    }

    /// Persist the state for a session.
    pub fn save(&self, id: Uuid, state: SessionState) {
        self.sessions.insert(
            id,
            SessionEntry {
                state,
                last_seen: Instant::now(),
            },
        );
    }

    /// Remove sessions idle longer than the TTL.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|entry| now.duration_since(entry.value().last_seen) >= self.idle_ttl)
            .map(|entry| *entry.key())
            .collect();

        let count = expired.len();
        for id in expired {
            self.sessions.remove(&id);
            tracing::debug!("removed idle session {}", id);
        }
        count
    }

    /// Start the background cleanup task.
    pub fn start_cleanup_task(&self, interval: Duration) {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let removed = store.cleanup_expired();
                if removed > 0 {
                    tracing::debug!("session cleanup: removed {} idle sessions", removed);
                }
            }
        });
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True if no sessions are active.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    #[cfg(test)]
    fn age_session(&self, id: Uuid, by: Duration) {
        let mut entry = self.sessions.get_mut(&id).unwrap();
        entry.last_seen = Instant::now() - by;
    }
}
