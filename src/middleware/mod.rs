// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (session resolution, security headers).

pub mod auth;
pub mod security;

pub use auth::{resolve_session, SessionContext};
