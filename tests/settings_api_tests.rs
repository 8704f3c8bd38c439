// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Site settings and media library API tests.

use axum::http::StatusCode;
use ironpulse_shell::models::settings::{
    DEFAULT_HERO_HEADLINE, DEFAULT_HERO_IMAGE, DEFAULT_HERO_SUBLINE, DEFAULT_MISSION_IMAGE,
};
use ironpulse_shell::models::{MediaLibrary, SiteSettings};
use ironpulse_shell::store::{keys, DurableStore};
use serde_json::json;

mod common;

#[tokio::test]
async fn test_empty_storage_serves_defaults() {
    let (app, _, backend) = common::create_test_app();
    let (status, body) = common::call(&app, "GET", "/api/settings/site", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logo"], "");
    assert_eq!(body["heroImage"], DEFAULT_HERO_IMAGE);
    assert_eq!(body["missionImage"], DEFAULT_MISSION_IMAGE);
    assert_eq!(body["heroHeadline"], DEFAULT_HERO_HEADLINE);
    assert_eq!(body["heroSubline"], DEFAULT_HERO_SUBLINE);

    // Defaults are not written back.
    assert_eq!(backend.get(keys::SITE_SETTINGS).unwrap(), None);
}

#[tokio::test]
async fn test_admin_updates_settings() {
    let (app, state, backend) = common::create_test_app();
    let token = common::login(&app, "a1").await;

    let (status, body) = common::call(
        &app,
        "PUT",
        "/api/settings/site",
        Some(&token),
        Some(json!({ "heroHeadline": "BUILT DIFFERENT", "logo": "https://cdn.ironpulse.test/logo.svg" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["heroHeadline"], "BUILT DIFFERENT");
    assert_eq!(body["heroSubline"], DEFAULT_HERO_SUBLINE);

    // Visible on the next read and already durable.
    let (_, body) = common::call(&app, "GET", "/api/settings/site", None, None).await;
    assert_eq!(body["logo"], "https://cdn.ironpulse.test/logo.svg");

    let raw = backend.get(keys::SITE_SETTINGS).unwrap().unwrap();
    let stored: SiteSettings = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, state.settings.site_settings());
}

#[tokio::test]
async fn test_non_admin_cannot_update_settings() {
    let (app, _, _) = common::create_test_app();
    let body = json!({ "heroHeadline": "HACKED" });

    let (status, _) =
        common::call(&app, "PUT", "/api/settings/site", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let coach = common::login(&app, "c1").await;
    let (status, _) =
        common::call(&app, "PUT", "/api/settings/site", Some(&coach), Some(body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, settings) = common::call(&app, "GET", "/api/settings/site", None, None).await;
    assert_eq!(settings["heroHeadline"], DEFAULT_HERO_HEADLINE);
}

#[tokio::test]
async fn test_invalid_settings_update() {
    let (app, _, _) = common::create_test_app();
    let token = common::login(&app, "a1").await;

    let (status, body) = common::call(
        &app,
        "PUT",
        "/api/settings/site",
        Some(&token),
        Some(json!({ "heroHeadline": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_media_library_seeded() {
    let (app, _, _) = common::create_test_app();
    let (status, body) = common::call(&app, "GET", "/api/media", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let assets = body.as_array().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0]["id"], "default-hero");
    assert_eq!(assets[0]["data"], DEFAULT_HERO_IMAGE);
}

#[tokio::test]
async fn test_coach_media_lifecycle() {
    let (app, _, backend) = common::create_test_app();
    let coach = common::login(&app, "c1").await;

    let (status, asset) = common::call(
        &app,
        "POST",
        "/api/media",
        Some(&coach),
        Some(json!({
            "type": "video",
            "data": "https://cdn.ironpulse.test/squat.mp4",
            "name": "Squat form",
            "category": "Technique",
            "isPublic": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(asset["creatorId"], "c1");
    assert_eq!(asset["creatorName"], "Marcus Steel");
    let id = asset["id"].as_str().unwrap().to_string();

    // Private asset: the owner sees it, anonymous visitors do not.
    let (_, mine) = common::call(&app, "GET", "/api/media", Some(&coach), None).await;
    assert_eq!(mine[0]["id"], id.as_str());
    let (_, public) = common::call(&app, "GET", "/api/media", None, None).await;
    assert_eq!(public.as_array().unwrap().len(), 1);

    let raw = backend.get(keys::MEDIA_LIBRARY).unwrap().unwrap();
    let stored: MediaLibrary = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 2);

    // Another coach may not remove it.
    let other = common::login(&app, "c2").await;
    let response =
        common::send(&app, "DELETE", &format!("/api/media/{id}"), Some(&other), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response =
        common::send(&app, "DELETE", &format!("/api/media/{id}"), Some(&coach), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response =
        common::send(&app, "DELETE", &format!("/api/media/{id}"), Some(&coach), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_client_cannot_add_media() {
    let (app, _, _) = common::create_test_app();
    let client = common::login(&app, "u1").await;

    let (status, _) = common::call(
        &app,
        "POST",
        "/api/media",
        Some(&client),
        Some(json!({
            "type": "image",
            "data": "https://cdn.ironpulse.test/me.jpg",
            "name": "Me",
            "category": "Progress"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_removes_default_asset() {
    let (app, state, _) = common::create_test_app();
    let admin = common::login(&app, "a1").await;

    let response = common::send(&app, "DELETE", "/api/media/default-hero", Some(&admin), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(state.settings.media_library().is_empty());
}

#[tokio::test]
async fn test_media_validation() {
    let (app, _, _) = common::create_test_app();
    let admin = common::login(&app, "a1").await;

    let (status, _) = common::call(
        &app,
        "POST",
        "/api/media",
        Some(&admin),
        Some(json!({
            "type": "image",
            "data": "",
            "name": "Empty",
            "category": "Hero"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
