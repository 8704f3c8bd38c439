// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Settings store tests against the file-backed store.

use ironpulse_shell::models::{
    MediaAsset, MediaLibrary, MediaType, Role, SiteSettings, SiteSettingsUpdate, User,
};
use ironpulse_shell::store::{keys, DurableStore, FileStore, SettingsStore};
use std::sync::Arc;

fn open(path: &std::path::Path) -> SettingsStore {
    SettingsStore::new(Arc::new(FileStore::open(path).unwrap()))
}

fn admin() -> User {
    User {
        id: "a1".to_string(),
        first_name: "Dana".to_string(),
        last_name: "Whitfield".to_string(),
        email: "dana@ironpulse.test".to_string(),
        role: Role::Admin,
        avatar: String::new(),
        member_since: "2018".to_string(),
        level: "Staff".to_string(),
    }
}

#[test]
fn test_fresh_file_yields_default_settings() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir.path().join("storage.json"));

    assert_eq!(
        store.load(keys::SITE_SETTINGS, SiteSettings::default()),
        SiteSettings::default()
    );
    assert_eq!(store.site_settings(), SiteSettings::default());
    assert_eq!(store.media_library(), MediaLibrary::seeded());
}

#[test]
fn test_documents_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let store = open(&path);
    store.update_site_settings(SiteSettingsUpdate {
        hero_subline: Some("Train with purpose.".to_string()),
        ..Default::default()
    });
    store
        .add_media(MediaAsset {
            id: "m1".to_string(),
            media_type: MediaType::Image,
            data: "https://cdn.ironpulse.test/gym.jpg".to_string(),
            name: "Gym floor".to_string(),
            category: "Mission".to_string(),
            created_at: "2026-03-01T08:00:00Z".to_string(),
            is_public: true,
            creator_name: Some("Dana Whitfield".to_string()),
            creator_id: Some("a1".to_string()),
        })
        .unwrap();
    drop(store);

    let restarted = open(&path);
    assert_eq!(restarted.site_settings().hero_subline, "Train with purpose.");
    let ids: Vec<_> = restarted
        .media_library()
        .assets()
        .iter()
        .map(|a| a.id.clone())
        .collect();
    assert_eq!(ids, vec!["m1", "default-hero"]);

    restarted.remove_media("default-hero", &admin()).unwrap();
    assert_eq!(open(&path).media_library().len(), 1);
}

#[test]
fn test_documents_use_separate_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let backend = Arc::new(FileStore::open(&path).unwrap());
    let store = SettingsStore::new(backend.clone());

    // Auxiliary flags share the namespace without disturbing the documents.
    backend.set(&keys::mfa_enabled("u1"), "true").unwrap();
    backend.set(&keys::trusted_device("u1"), "false").unwrap();
    store.replace_site_settings(SiteSettings::default());

    assert!(backend.get(keys::SITE_SETTINGS).unwrap().is_some());
    assert!(backend.get(keys::MEDIA_LIBRARY).unwrap().is_none());
    assert_eq!(
        backend.get("mfa_enabled_u1").unwrap().as_deref(),
        Some("true")
    );
}

#[test]
fn test_malformed_media_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let backend = FileStore::open(&path).unwrap();
    backend.set(keys::MEDIA_LIBRARY, "{\"not\":\"an array\"}").unwrap();

    let store = SettingsStore::new(Arc::new(backend));
    assert_eq!(store.media_library(), MediaLibrary::seeded());
}

#[test]
fn test_save_recovers_from_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = open(&path);
    assert_eq!(store.site_settings(), SiteSettings::default());
    store.update_site_settings(SiteSettingsUpdate {
        hero_headline: Some("NEW".to_string()),
        ..Default::default()
    });
    drop(store);

    let reopened = open(&path);
    assert_eq!(reopened.site_settings().hero_headline, "NEW");
    assert_eq!(reopened.media_library(), MediaLibrary::seeded());
}
