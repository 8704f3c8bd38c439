// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Viewer session and the impersonation state machine.
//!
//! A session is `Anonymous`, `Normal` (one viewer), or `Impersonating` (an
//! admin acting as another user, with the admin kept as the original
//! viewer). Fields are private; only the transitions below change them, and
//! a failed transition leaves the session as it was.

pub mod registry;

pub use registry::{SessionId, SessionRegistry};

use crate::models::{Role, User};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SessionState {
    Anonymous,
    Normal,
    Impersonating,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("A session is already active for user {0}")]
    SessionActive(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("Only admins may impersonate (viewer role is {0})")]
    NotAdmin(Role),

    #[error("Already impersonating; stop first")]
    AlreadyImpersonating,

    #[error("Cannot impersonate yourself")]
    SelfImpersonation,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Permission(#[from] PermissionError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current_viewer: Option<User>,
    /// Set only while impersonating; always an admin.
    original_viewer: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_viewer(&self) -> Option<&User> {
        self.current_viewer.as_ref()
    }

    pub fn original_viewer(&self) -> Option<&User> {
        self.original_viewer.as_ref()
    }

    pub fn is_impersonating(&self) -> bool {
        self.original_viewer.is_some()
    }

    pub fn state(&self) -> SessionState {
        match (&self.current_viewer, &self.original_viewer) {
            (None, _) => SessionState::Anonymous,
            (Some(_), None) => SessionState::Normal,
            (Some(_), Some(_)) => SessionState::Impersonating,
        }
    }

    /// Start a session for `user`. Fails if one is already active.
    pub fn login(&mut self, user: User) -> Result<(), SessionError> {
        if let Some(existing) = &self.current_viewer {
            return Err(AuthError::SessionActive(existing.id.clone()).into());
        }
        tracing::info!(user_id = %user.id, role = %user.role, "Viewer logged in");
        self.current_viewer = Some(user);
        Ok(())
    }

    /// End the whole session, including any impersonation.
    pub fn logout(&mut self) {
        if let Some(viewer) = &self.current_viewer {
            tracing::info!(
                user_id = %viewer.id,
                impersonating = self.is_impersonating(),
                "Viewer logged out"
            );
        }
        self.current_viewer = None;
        self.original_viewer = None;
    }

    /// Act as `target`. Only a non-impersonating admin may do this.
    pub fn impersonate(&mut self, target: User) -> Result<(), SessionError> {
        if self.is_impersonating() {
            return Err(PermissionError::AlreadyImpersonating.into());
        }
        let admin = self
            .current_viewer
            .as_ref()
            .ok_or(PermissionError::NotLoggedIn)?;
        if admin.role != Role::Admin {
            return Err(PermissionError::NotAdmin(admin.role).into());
        }
        if *admin == target {
            return Err(PermissionError::SelfImpersonation.into());
        }

        tracing::info!(
            admin_id = %admin.id,
            target_id = %target.id,
            target_role = %target.role,
            "Impersonation started"
        );
        self.original_viewer = self.current_viewer.replace(target);
        Ok(())
    }

    /// Restore the admin. Returns `false`, changing nothing, when not
    /// impersonating.
    pub fn stop_impersonating(&mut self) -> bool {
        let Some(admin) = self.original_viewer.take() else {
            return false;
        };
        tracing::info!(
            admin_id = %admin.id,
            target_id = self.current_viewer.as_ref().map(|u| u.id.as_str()).unwrap_or(""),
            "Impersonation stopped"
        );
        self.current_viewer = Some(admin);
        true
    }
}
