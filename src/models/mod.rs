// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod media;
pub mod settings;
pub mod user;

pub use media::{MediaAsset, MediaError, MediaLibrary, MediaType};
pub use settings::{SiteSettings, SiteSettingsUpdate};
pub use user::{Role, UnknownRole, User};
