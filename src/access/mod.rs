// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role-based navigation access control.

pub mod guard;
pub mod routes;

pub use guard::{guard, Decision, Denial};
pub use routes::{Requirement, RouteEntry, RouteListing, RouteRule, RouteTable};
