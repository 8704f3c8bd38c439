// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted settings documents with write-through caching.
//!
//! Provides:
//! - `load` / `save` for any serde document under a key
//! - Site settings (`ironpulse_site_settings`)
//! - Media library (`ironpulse_media_library`)
//!
//! Storage failures never reach the caller: reads fall back to the supplied
//! default and writes become no-ops, both logged at `warn`.

use super::{keys, DurableStore, StorageError};
use crate::models::{
    MediaAsset, MediaError, MediaLibrary, SiteSettings, SiteSettingsUpdate, User,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Documents {
    site: Option<SiteSettings>,
    media: Option<MediaLibrary>,
}

/// Settings store shared across the process.
#[derive(Clone)]
pub struct SettingsStore {
    backend: Arc<dyn DurableStore>,
    // Each mutation holds this lock across its write-through.
    documents: Arc<Mutex<Documents>>,
}

impl SettingsStore {
    pub fn new(backend: Arc<dyn DurableStore>) -> Self {
        Self {
            backend,
            documents: Arc::new(Mutex::new(Documents::default())),
        }
    }

    /// Read `key`, or `default` if it is absent, unreadable, or malformed.
    /// The default is not written back.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage read failed, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored value is malformed, using default");
                default
            }
        }
    }

    /// Serialize `value` under `key`. Failures are logged and dropped.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            tracing::warn!(key, error = %e, "Storage write failed, change kept in memory only");
        }
    }

    fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    fn documents(&self) -> MutexGuard<'_, Documents> {
        // The cache holds plain values, so a panic mid-update cannot leave
        // it half-written.
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ─── Site Settings ───────────────────────────────────────────

    pub fn site_settings(&self) -> SiteSettings {
        let mut docs = self.documents();
        docs.site
            .get_or_insert_with(|| self.load(keys::SITE_SETTINGS, SiteSettings::default()))
            .clone()
    }

    pub fn replace_site_settings(&self, settings: SiteSettings) {
        let mut docs = self.documents();
        self.save(keys::SITE_SETTINGS, &settings);
        docs.site = Some(settings);
    }

    /// Apply a partial update and return the new settings.
    pub fn update_site_settings(&self, update: SiteSettingsUpdate) -> SiteSettings {
        let mut docs = self.documents();
        let settings = docs
            .site
            .get_or_insert_with(|| self.load(keys::SITE_SETTINGS, SiteSettings::default()));
        settings.apply(update);
        self.save(keys::SITE_SETTINGS, &*settings);
        settings.clone()
    }

    // ─── Media Library ───────────────────────────────────────────

    pub fn media_library(&self) -> MediaLibrary {
        let mut docs = self.documents();
        self.media_mut(&mut docs).clone()
    }

    pub fn visible_media(&self, viewer: Option<&User>) -> Vec<MediaAsset> {
        let mut docs = self.documents();
        self.media_mut(&mut docs).visible_to(viewer)
    }

    pub fn add_media(&self, asset: MediaAsset) -> Result<(), MediaError> {
        let mut docs = self.documents();
        let library = self.media_mut(&mut docs);
        library.insert(asset)?;
        self.save(keys::MEDIA_LIBRARY, &*library);
        Ok(())
    }

    /// Remove an asset on behalf of `user`.
    pub fn remove_media(&self, id: &str, user: &User) -> Result<MediaAsset, MediaError> {
        let mut docs = self.documents();
        let library = self.media_mut(&mut docs);
        let removed = library.remove_as(id, user)?;
        self.save(keys::MEDIA_LIBRARY, &*library);
        Ok(removed)
    }

    fn media_mut<'a>(&self, docs: &'a mut Documents) -> &'a mut MediaLibrary {
        docs.media
            .get_or_insert_with(|| self.load(keys::MEDIA_LIBRARY, MediaLibrary::seeded()))
    }
}
