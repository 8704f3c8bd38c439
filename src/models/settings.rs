//! Site branding settings document.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const DEFAULT_HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1534438327276-14e5300c3a48?q=80&w=2070&auto=format&fit=crop";
pub const DEFAULT_MISSION_IMAGE: &str =
    "https://images.unsplash.com/photo-1571019614242-c5c5dee9f50b?q=80&w=2070&auto=format&fit=crop";
pub const DEFAULT_HERO_HEADLINE: &str = "FORGE YOUR LEGACY";
pub const DEFAULT_HERO_SUBLINE: &str =
    "Elite coaching, science-backed programming, and a community that refuses to settle.";

/// Branding settings shown on the marketing pages.
///
/// Stored under `ironpulse_site_settings`. Missing fields in a stored
/// document are filled from the defaults so the value is always complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SiteSettings {
    /// Logo URI; the stored form uses an empty string for "no logo".
    #[serde(
        deserialize_with = "empty_as_none",
        serialize_with = "none_as_empty"
    )]
    pub logo: Option<String>,
    pub hero_image: String,
    pub mission_image: String,
    pub hero_headline: String,
    pub hero_subline: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            logo: None,
            hero_image: DEFAULT_HERO_IMAGE.to_string(),
            mission_image: DEFAULT_MISSION_IMAGE.to_string(),
            hero_headline: DEFAULT_HERO_HEADLINE.to_string(),
            hero_subline: DEFAULT_HERO_SUBLINE.to_string(),
        }
    }
}

/// Partial update; only supplied fields are replaced.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsUpdate {
    /// `Some("")` clears the logo.
    pub logo: Option<String>,
    #[validate(length(min = 1))]
    pub hero_image: Option<String>,
    #[validate(length(min = 1))]
    pub mission_image: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub hero_headline: Option<String>,
    #[validate(length(max = 400))]
    pub hero_subline: Option<String>,
}

impl SiteSettings {
    pub fn apply(&mut self, update: SiteSettingsUpdate) {
        if let Some(logo) = update.logo {
            self.logo = if logo.is_empty() { None } else { Some(logo) };
        }
        if let Some(hero_image) = update.hero_image {
            self.hero_image = hero_image;
        }
        if let Some(mission_image) = update.mission_image {
            self.mission_image = mission_image;
        }
        if let Some(hero_headline) = update.hero_headline {
            self.hero_headline = hero_headline;
        }
        if let Some(hero_subline) = update.hero_subline {
            self.hero_subline = hero_subline;
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn none_as_empty<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}
