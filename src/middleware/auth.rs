// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token middleware.
//!
//! Every API request passes through `resolve_session`. A valid token naming a
//! live session attaches that session's id; anything else (no token, bad
//! signature, expired, unknown session) makes the caller anonymous. Routes
//! decide for themselves what an anonymous caller may do.

use crate::session::{Session, SessionId, SessionRegistry};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "ironpulse_session";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (session id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Session attached to the request, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub id: Option<SessionId>,
}

impl SessionContext {
    /// Snapshot of the caller's session; anonymous when there is none.
    pub fn session(&self, registry: &SessionRegistry) -> Session {
        self.id
            .as_ref()
            .and_then(|id| registry.get(id))
            .unwrap_or_default()
    }
}

/// Middleware that resolves the caller's session without requiring one.
pub async fn resolve_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let id = extract_token(&jar, &request)
        .and_then(|token| verify_token(&token, &state.config.session_signing_key))
        .filter(|id| state.sessions.get(id).is_some());

    if id.is_none() && (jar.get(SESSION_COOKIE).is_some() || has_bearer(&request)) {
        tracing::debug!("Stale or invalid session token, treating caller as anonymous");
    }

    request.extensions_mut().insert(SessionContext { id });
    next.run(request).await
}

fn has_bearer(request: &Request) -> bool {
    request.headers().contains_key(header::AUTHORIZATION)
}

/// Cookie first, then bearer header.
fn extract_token(jar: &CookieJar, request: &Request) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Validate a token and return the session id it names.
pub fn verify_token(token: &str, signing_key: &[u8]) -> Option<SessionId> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &key, &validation)
        .ok()
        .map(|data| SessionId::from(data.claims.sub))
}

/// Create a signed token for a session.
pub fn create_token(
    session_id: &SessionId,
    signing_key: &[u8],
    ttl_hours: u64,
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: session_id.to_string(),
        iat: now,
        exp: now + (ttl_hours as usize) * 60 * 60,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
