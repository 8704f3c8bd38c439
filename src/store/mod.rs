// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable key-value storage and the persisted settings documents.

pub mod file;
pub mod memory;
pub mod settings;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use settings::SettingsStore;

/// Storage keys as constants.
pub mod keys {
    /// Site branding document (`SiteSettings`)
    pub const SITE_SETTINGS: &str = "ironpulse_site_settings";
    /// Media library document (array of `MediaAsset`)
    pub const MEDIA_LIBRARY: &str = "ironpulse_media_library";

    /// Per-user MFA flag, owned by the security settings screen.
    pub fn mfa_enabled(user_id: &str) -> String {
        format!("mfa_enabled_{user_id}")
    }

    /// Per-user trusted-device flag, owned by the security settings screen.
    pub fn trusted_device(user_id: &str) -> String {
        format!("trusted_device_{user_id}")
    }
}

/// Failure talking to the durable store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key-value storage, one namespace per profile.
pub trait DurableStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites any prior value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
