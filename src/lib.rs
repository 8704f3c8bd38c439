// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! IronPulse session and access control shell.
//!
//! This crate decides which viewer may reach which page of the IronPulse
//! coaching platform, manages admin impersonation, and persists the site
//! branding and media library documents. The decision logic is plain Rust
//! (`access`, `session`, `store`); `routes` exposes it over HTTP.

pub mod access;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod store;

use access::RouteTable;
use config::Config;
use services::UserDirectory;
use session::SessionRegistry;
use store::SettingsStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    pub sessions: SessionRegistry,
    pub settings: SettingsStore,
    pub directory: UserDirectory,
}
