// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live sessions keyed by session id.

use super::Session;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
struct Entry {
    session: Session,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Concurrent map of sessions. Each entry is mutated under its shard lock,
/// so a transition on one session never interleaves with another on the same
/// session.
///
/// Entries live as long as the token issued for them. Expired entries read as
/// absent, are dropped when touched, and are swept on every insert.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Entry>,
    ttl: TimeDelta,
}

impl SessionRegistry {
    /// Registry whose sessions expire `ttl_hours` after creation.
    pub fn new(ttl_hours: u64) -> Self {
        let ttl = i64::try_from(ttl_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .unwrap_or(TimeDelta::MAX);
        Self::with_ttl(ttl)
    }

    pub fn with_ttl(ttl: TimeDelta) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Store `session` under a fresh id.
    pub fn insert(&self, session: Session) -> SessionId {
        let now = Utc::now();
        self.purge_expired(now);

        let id = SessionId::generate();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.sessions
            .insert(id.clone(), Entry { session, expires_at });
        id
    }

    /// Snapshot of a session.
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.update(id, |s| s.clone())
    }

    /// Run `f` against the live session, if it exists and has not expired.
    pub fn update<R>(&self, id: &SessionId, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let now = Utc::now();
        // Drop an expired entry before taking the write guard on it.
        if self
            .sessions
            .remove_if(id, |_, entry| entry.is_expired(now))
            .is_some()
        {
            tracing::debug!(session_id = %id, "Session expired");
            return None;
        }
        self.sessions
            .get_mut(id)
            .map(|mut entry| f(&mut entry.session))
    }

    pub fn remove(&self, id: &SessionId) -> Option<Session> {
        self.sessions.remove(id).map(|(_, entry)| entry.session)
    }

    /// Drop every entry whose expiry is at or before `now`.
    pub fn purge_expired(&self, now: DateTime<Utc>) {
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| !entry.is_expired(now));
        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            tracing::debug!(count = purged, "Purged expired sessions");
        }
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
