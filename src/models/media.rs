//! Media library document.

use crate::models::settings::DEFAULT_HERO_IMAGE;
use crate::models::user::{Role, User};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Id of the asset seeded into an empty library.
pub const DEFAULT_ASSET_ID: &str = "default-hero";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MediaType {
    Image,
    Video,
}

/// One asset in the media library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MediaAsset {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// URI or embedded data URL
    pub data: String,
    pub name: String,
    pub category: String,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
}

impl MediaAsset {
    /// Asset seeded when the library has never been stored.
    pub fn default_hero() -> Self {
        Self {
            id: DEFAULT_ASSET_ID.to_string(),
            media_type: MediaType::Image,
            data: DEFAULT_HERO_IMAGE.to_string(),
            name: "Default Hero".to_string(),
            category: "Hero".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            is_public: true,
            creator_name: None,
            creator_id: None,
        }
    }

    pub fn is_created_by(&self, user: &User) -> bool {
        self.creator_id.as_deref() == Some(user.id.as_str())
    }

    /// Admins see everything; everyone else sees public assets and their own.
    pub fn is_visible_to(&self, viewer: Option<&User>) -> bool {
        match viewer {
            Some(user) if user.role == Role::Admin => true,
            Some(user) => self.is_public || self.is_created_by(user),
            None => self.is_public,
        }
    }

    /// Admins may remove any asset; coaches only their own.
    pub fn is_removable_by(&self, user: &User) -> bool {
        match user.role {
            Role::Admin => true,
            Role::Coach => self.is_created_by(user),
            Role::Client | Role::Support => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("Media asset already exists: {0}")]
    DuplicateAsset(String),

    #[error("Media asset not found: {0}")]
    NotFound(String),

    #[error("Not allowed to remove media asset: {0}")]
    NotPermitted(String),
}

/// Ordered collection of assets, newest first. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaLibrary(Vec<MediaAsset>);

impl MediaLibrary {
    /// Library used when nothing has been stored yet.
    pub fn seeded() -> Self {
        Self(vec![MediaAsset::default_hero()])
    }

    pub fn assets(&self) -> &[MediaAsset] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MediaAsset> {
        self.0.iter().find(|a| a.id == id)
    }

    pub fn visible_to(&self, viewer: Option<&User>) -> Vec<MediaAsset> {
        self.0
            .iter()
            .filter(|a| a.is_visible_to(viewer))
            .cloned()
            .collect()
    }

    /// Insert at the front.
    pub fn insert(&mut self, asset: MediaAsset) -> Result<(), MediaError> {
        if self.get(&asset.id).is_some() {
            return Err(MediaError::DuplicateAsset(asset.id));
        }
        self.0.insert(0, asset);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<MediaAsset, MediaError> {
        let index = self
            .0
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| MediaError::NotFound(id.to_string()))?;
        Ok(self.0.remove(index))
    }

    /// Remove on behalf of `user`, honoring removal rights.
    pub fn remove_as(&mut self, id: &str, user: &User) -> Result<MediaAsset, MediaError> {
        let asset = self
            .get(id)
            .ok_or_else(|| MediaError::NotFound(id.to_string()))?;
        if !asset.is_removable_by(user) {
            return Err(MediaError::NotPermitted(id.to_string()));
        }
        self.remove(id)
    }
}
