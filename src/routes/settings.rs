// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Site settings and media library routes.

use crate::error::Result;
use crate::middleware::SessionContext;
use crate::models::{MediaAsset, MediaType, Role, SiteSettings, SiteSettingsUpdate};
use crate::routes::require_role;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Largest accepted `data` payload (embedded data URLs included).
const MAX_MEDIA_DATA_LEN: u64 = 1024 * 1024;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/settings/site",
            get(get_site_settings).put(update_site_settings),
        )
        .route("/api/media", get(list_media).post(add_media))
        .route("/api/media/{id}", delete(remove_media))
}

// ─── Site Settings ───────────────────────────────────────────

async fn get_site_settings(State(state): State<Arc<AppState>>) -> Json<SiteSettings> {
    Json(state.settings.site_settings())
}

/// Partial update of the branding settings (admins only).
async fn update_site_settings(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Json(update): Json<SiteSettingsUpdate>,
) -> Result<Json<SiteSettings>> {
    let session = ctx.session(&state.sessions);
    let admin = require_role(&session, &[Role::Admin])?;
    update.validate()?;

    let settings = state.settings.update_site_settings(update);
    tracing::info!(user_id = %admin.id, "Site settings updated");
    Ok(Json(settings))
}

// ─── Media Library ───────────────────────────────────────────

async fn list_media(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Json<Vec<MediaAsset>> {
    let session = ctx.session(&state.sessions);
    Json(state.settings.visible_media(session.current_viewer()))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct NewMediaAsset {
    #[serde(rename = "type")]
    media_type: MediaType,
    #[validate(length(min = 1, max = MAX_MEDIA_DATA_LEN))]
    data: String,
    #[validate(length(min = 1, max = 200))]
    name: String,
    #[validate(length(min = 1, max = 60))]
    category: String,
    #[serde(default)]
    is_public: bool,
}

/// Add an asset to the library (coaches and admins).
async fn add_media(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<NewMediaAsset>,
) -> Result<(StatusCode, Json<MediaAsset>)> {
    let session = ctx.session(&state.sessions);
    let editor = require_role(&session, &[Role::Coach, Role::Admin])?;
    body.validate()?;

    let asset = MediaAsset {
        id: uuid::Uuid::new_v4().to_string(),
        media_type: body.media_type,
        data: body.data,
        name: body.name,
        category: body.category,
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        is_public: body.is_public,
        creator_name: Some(editor.display_name()),
        creator_id: Some(editor.id.clone()),
    };
    state.settings.add_media(asset.clone())?;

    tracing::info!(
        asset_id = %asset.id,
        user_id = %editor.id,
        category = %asset.category,
        "Media asset added"
    );
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Remove an asset: admins any, coaches their own.
async fn remove_media(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let session = ctx.session(&state.sessions);
    let editor = require_role(&session, &[Role::Coach, Role::Admin])?;

    state.settings.remove_media(&id, editor)?;
    tracing::info!(asset_id = %id, user_id = %editor.id, "Media asset removed");
    Ok(StatusCode::NO_CONTENT)
}
