// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route table as data.
//!
//! The table is an ordered list of entries. A page entry matches one path
//! pattern (`:param` segments match any single segment). A group entry gates
//! its root and everything below it with one rule, so sub-pages inherit the
//! group's requirement instead of declaring their own.

use crate::access::guard::{guard, Decision, Denial};
use crate::models::Role;
use crate::session::Session;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Public home path, used as the default fallback.
pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// What a viewer needs to reach a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Requirement {
    Public,
    /// Any logged-in viewer.
    Authenticated,
    Role(Role),
}

/// Access requirement for one path or path group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteRule {
    pub path: String,
    pub requirement: Requirement,
    /// Redirect target on denial
    pub fallback: String,
}

impl RouteRule {
    pub fn public(path: &str) -> Self {
        Self {
            path: path.to_string(),
            requirement: Requirement::Public,
            fallback: HOME_PATH.to_string(),
        }
    }

    pub fn authenticated(path: &str, fallback: &str) -> Self {
        Self {
            path: path.to_string(),
            requirement: Requirement::Authenticated,
            fallback: fallback.to_string(),
        }
    }

    pub fn role(path: &str, role: Role, fallback: &str) -> Self {
        Self {
            path: path.to_string(),
            requirement: Requirement::Role(role),
            fallback: fallback.to_string(),
        }
    }

    pub fn required_role(&self) -> Option<Role> {
        match self.requirement {
            Requirement::Role(role) => Some(role),
            Requirement::Public | Requirement::Authenticated => None,
        }
    }

    pub fn is_public(&self) -> bool {
        self.requirement == Requirement::Public
    }

    /// Whether `path` matches this rule's pattern exactly.
    fn matches_pattern(&self, path: &str) -> bool {
        let mut pattern = segments(&self.path);
        let mut actual = segments(path);
        loop {
            match (pattern.next(), actual.next()) {
                (None, None) => return true,
                (Some(p), Some(a)) if p.starts_with(':') || p == a => continue,
                _ => return false,
            }
        }
    }

    /// Whether `path` is the rule's path or lies below it.
    fn contains(&self, path: &str) -> bool {
        path == self.path
            || path
                .strip_prefix(self.path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// One entry in the route table.
#[derive(Debug, Clone)]
pub enum RouteEntry {
    Page(RouteRule),
    /// Gate at `rule.path`; `children` are the known sub-paths, relative to it.
    Group {
        rule: RouteRule,
        children: Vec<String>,
    },
}

impl RouteEntry {
    pub fn rule(&self) -> &RouteRule {
        match self {
            RouteEntry::Page(rule) | RouteEntry::Group { rule, .. } => rule,
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            RouteEntry::Page(rule) => rule.matches_pattern(path),
            RouteEntry::Group { rule, .. } => rule.contains(path),
        }
    }
}

/// A concrete path with its effective rule, for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteListing {
    pub path: String,
    pub requirement: Requirement,
    pub fallback: String,
    /// Root of the gating group, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, rule: RouteRule) -> Self {
        self.entries.push(RouteEntry::Page(rule));
        self
    }

    pub fn group(mut self, rule: RouteRule, children: &[&str]) -> Self {
        self.entries.push(RouteEntry::Group {
            rule,
            children: children.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    /// The IronPulse platform route table.
    pub fn ironpulse() -> Self {
        Self::new()
            .page(RouteRule::public("/"))
            .page(RouteRule::public("/courses"))
            .page(RouteRule::public("/courses/:id"))
            .page(RouteRule::public("/coaches"))
            .page(RouteRule::public("/contact"))
            .page(RouteRule::public(LOGIN_PATH))
            .page(RouteRule::public("/signup"))
            .page(RouteRule::public("/custom-course"))
            .group(
                RouteRule::authenticated("/profile", LOGIN_PATH),
                &["courses", "settings", "security", "billing"],
            )
            .page(RouteRule::authenticated("/workout/:id", LOGIN_PATH))
            .group(
                RouteRule::role("/admin", Role::Admin, HOME_PATH),
                &[
                    "users",
                    "courses",
                    "coaches",
                    "finance",
                    "media",
                    "settings",
                    "payments",
                    "architect",
                    "diagnostics",
                ],
            )
            .group(
                RouteRule::role("/coach", Role::Coach, HOME_PATH),
                &["athletes", "programs", "media", "schedule"],
            )
            .group(
                RouteRule::role("/support", Role::Support, HOME_PATH),
                &["tickets", "users"],
            )
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Effective rule for `path`; the first matching entry wins.
    pub fn resolve(&self, path: &str) -> Option<&RouteRule> {
        let path = normalize(path);
        self.entries
            .iter()
            .find(|entry| entry.matches(&path))
            .map(RouteEntry::rule)
    }

    /// Resolve `path` and run the guard. Unknown paths are sent home.
    pub fn check(&self, session: &Session, path: &str) -> Decision {
        match self.resolve(path) {
            Some(rule) => guard(session, rule),
            None => Decision::Redirect {
                to: HOME_PATH.to_string(),
                reason: Denial::UnknownRoute,
            },
        }
    }

    /// Every known concrete path with its effective rule.
    pub fn listing(&self) -> Vec<RouteListing> {
        let mut out = Vec::new();
        for entry in &self.entries {
            match entry {
                RouteEntry::Page(rule) => out.push(RouteListing {
                    path: rule.path.clone(),
                    requirement: rule.requirement,
                    fallback: rule.fallback.clone(),
                    group: None,
                }),
                RouteEntry::Group { rule, children } => {
                    let root = std::iter::once(rule.path.clone());
                    let subs = children.iter().map(|c| format!("{}/{}", rule.path, c));
                    out.extend(root.chain(subs).map(|path| RouteListing {
                        path,
                        requirement: rule.requirement,
                        fallback: rule.fallback.clone(),
                        group: Some(rule.path.clone()),
                    }));
                }
            }
        }
        out
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Drop query and fragment, then resolve the path the way a browser does:
/// empty and `.` segments vanish, `..` pops one segment and never climbs
/// above the root.
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let mut resolved: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    format!("/{}", resolved.join("/"))
}
