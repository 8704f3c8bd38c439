// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes: login, logout, and admin impersonation.
//!
//! Login is a demo login by user id; real credential checks belong to the
//! authentication provider and are not part of this service.

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_token, SESSION_COOKIE};
use crate::middleware::SessionContext;
use crate::models::{Role, User};
use crate::routes::require_role;
use crate::session::{Session, SessionState};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/session/login", post(login))
        .route("/api/session/logout", post(logout))
        .route("/api/session/impersonate", post(impersonate))
        .route("/api/session/stop-impersonating", post(stop_impersonating))
        .route("/api/users", get(list_users))
}

// ─── Session View ────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub state: SessionState,
    pub viewer: Option<User>,
    /// The admin behind an impersonation
    pub original_viewer: Option<User>,
    pub impersonating: bool,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            state: session.state(),
            viewer: session.current_viewer().cloned(),
            original_viewer: session.original_viewer().cloned(),
            impersonating: session.is_impersonating(),
        }
    }
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Json<SessionResponse> {
    Json(SessionResponse::from(&ctx.session(&state.sessions)))
}

// ─── Login / Logout ──────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRef {
    user_id: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub token: String,
    pub session: SessionResponse,
}

fn lookup_user(state: &AppState, user_id: &str) -> Result<User> {
    state
        .directory
        .get(user_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.frontend_url.starts_with("https://"))
        .build()
}

/// Start a session as `userId`. Fails with 409 if the caller already has one.
async fn login(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    jar: CookieJar,
    Json(body): Json<UserRef>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let user = lookup_user(&state, &body.user_id)?;

    let (id, session) = match ctx.id {
        Some(id) => {
            let session = state
                .sessions
                .update(&id, |s| s.login(user).map(|_| s.clone()))
                .ok_or(AppError::Unauthorized)??;
            (id, session)
        }
        None => {
            let mut session = Session::new();
            session.login(user)?;
            (state.sessions.insert(session.clone()), session)
        }
    };

    let token = create_token(
        &id,
        &state.config.session_signing_key,
        state.config.session_ttl_hours,
    )?;

    Ok((
        jar.add(session_cookie(&state, token.clone())),
        Json(LoginResponse {
            token,
            session: SessionResponse::from(&session),
        }),
    ))
}

/// End the session entirely, including any impersonation.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    if let Some(id) = &ctx.id {
        state.sessions.update(id, |s| s.logout());
        state.sessions.remove(id);
    }
    // Always send the expiry, even for bearer-token callers.
    let mut removal = Cookie::build(SESSION_COOKIE).path("/").build();
    removal.make_removal();
    (jar.add(removal), StatusCode::NO_CONTENT)
}

// ─── Impersonation ───────────────────────────────────────────

/// Act as another user. Admins only; no nesting.
async fn impersonate(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<UserRef>,
) -> Result<Json<SessionResponse>> {
    let id = ctx.id.ok_or(AppError::Unauthorized)?;
    let target = lookup_user(&state, &body.user_id)?;

    let session = state
        .sessions
        .update(&id, |s| s.impersonate(target).map(|_| s.clone()))
        .ok_or(AppError::Unauthorized)??;

    Ok(Json(SessionResponse::from(&session)))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StopImpersonatingResponse {
    /// False when there was nothing to stop
    pub stopped: bool,
    pub session: SessionResponse,
}

/// Return to the admin's own identity. A no-op outside impersonation.
async fn stop_impersonating(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Json<StopImpersonatingResponse> {
    let (stopped, session) = ctx
        .id
        .as_ref()
        .and_then(|id| {
            state
                .sessions
                .update(id, |s| (s.stop_impersonating(), s.clone()))
        })
        .unwrap_or_default();

    Json(StopImpersonatingResponse {
        stopped,
        session: SessionResponse::from(&session),
    })
}

/// User roster for the impersonation picker.
async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<Vec<User>>> {
    let session = ctx.session(&state.sessions);
    require_role(&session, &[Role::Admin])?;
    Ok(Json(state.directory.users().to_vec()))
}
