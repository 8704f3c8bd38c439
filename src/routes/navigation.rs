// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation checks for the single-page app's router.
//!
//! The frontend asks before every route change (initial load, links, deep
//! links, history navigation). Denials are answers, not errors: the response
//! is always 200 with a redirect target.

use crate::access::{Decision, RouteListing, RouteRule};
use crate::error::{AppError, Result};
use crate::middleware::SessionContext;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/routes", get(list_routes))
        .route("/api/navigate", get(navigate))
}

/// Every known path with its access rule.
async fn list_routes(State(state): State<Arc<AppState>>) -> Json<Vec<RouteListing>> {
    Json(state.routes.listing())
}

#[derive(Deserialize)]
struct NavigateQuery {
    path: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NavigateResponse {
    pub path: String,
    #[serde(flatten)]
    pub decision: Decision,
    /// Rule that produced the decision; absent for unknown paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<RouteRule>,
}

async fn navigate(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Query(query): Query<NavigateQuery>,
) -> Result<Json<NavigateResponse>> {
    if query.path.is_empty() {
        return Err(AppError::BadRequest("path must not be empty".to_string()));
    }

    let session = ctx.session(&state.sessions);
    let decision = state.routes.check(&session, &query.path);

    if let Decision::Redirect { to, reason } = &decision {
        tracing::debug!(
            path = %query.path,
            redirect = %to,
            reason = %reason,
            viewer = session.current_viewer().map(|u| u.id.as_str()).unwrap_or("anonymous"),
            "Navigation denied"
        );
    }

    Ok(Json(NavigateResponse {
        rule: state.routes.resolve(&query.path).cloned(),
        path: query.path,
        decision,
    }))
}
