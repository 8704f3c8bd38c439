// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation guard.

use crate::access::routes::{Requirement, RouteRule};
use crate::models::Role;
use crate::session::Session;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Why a navigation was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Denial {
    /// No viewer on a route that needs one.
    #[error("Authentication required")]
    Unauthenticated,

    /// Viewer present but holding a different role.
    #[error("Route requires role {required}, viewer has {actual}")]
    RoleMismatch { required: Role, actual: Role },

    /// Path matches no route.
    #[error("Unknown route")]
    UnknownRoute,
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Decision {
    Allow,
    Redirect { to: String, reason: Denial },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn denial(&self) -> Option<Denial> {
        match self {
            Decision::Allow => None,
            Decision::Redirect { reason, .. } => Some(*reason),
        }
    }
}

/// Decide whether the session's current viewer may reach `rule`.
///
/// Pure: the same inputs always give the same decision, so it is safe to call
/// on every route change, including deep links and history navigation.
pub fn guard(session: &Session, rule: &RouteRule) -> Decision {
    let required = match rule.requirement {
        Requirement::Public => return Decision::Allow,
        Requirement::Authenticated => None,
        Requirement::Role(role) => Some(role),
    };

    let Some(viewer) = session.current_viewer() else {
        return Decision::Redirect {
            to: rule.fallback.clone(),
            reason: Denial::Unauthenticated,
        };
    };

    match required {
        Some(role) if viewer.role != role => Decision::Redirect {
            to: rule.fallback.clone(),
            reason: Denial::RoleMismatch {
                required: role,
                actual: viewer.role,
            },
        },
        _ => Decision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            first_name: "Jordan".to_string(),
            last_name: "Lee".to_string(),
            email: format!("{id}@ironpulse.test"),
            role,
            avatar: String::new(),
            member_since: "2023".to_string(),
            level: "Intermediate".to_string(),
        }
    }

    fn session_as(role: Option<Role>) -> Session {
        let mut session = Session::new();
        if let Some(role) = role {
            session.login(user("viewer", role)).unwrap();
        }
        session
    }

    fn all_sessions() -> Vec<Session> {
        std::iter::once(None)
            .chain(Role::ALL.into_iter().map(Some))
            .map(session_as)
            .collect()
    }

    #[test]
    fn test_matching_role_is_allowed() {
        for role in Role::ALL {
            let rule = RouteRule::role("/area", role, "/");
            assert_eq!(guard(&session_as(Some(role)), &rule), Decision::Allow);
        }
    }

    #[test]
    fn test_other_roles_are_redirected() {
        for required in Role::ALL {
            let rule = RouteRule::role("/area", required, "/");
            for actual in Role::ALL.into_iter().filter(|r| *r != required) {
                let decision = guard(&session_as(Some(actual)), &rule);
                assert_eq!(
                    decision,
                    Decision::Redirect {
                        to: "/".to_string(),
                        reason: Denial::RoleMismatch { required, actual },
                    }
                );
            }
        }
    }

    #[test]
    fn test_anonymous_is_unauthenticated_not_mismatch() {
        for role in Role::ALL {
            let rule = RouteRule::role("/area", role, "/");
            let decision = guard(&session_as(None), &rule);
            assert_eq!(decision.denial(), Some(Denial::Unauthenticated));
            assert!(!decision.is_allowed());
        }
    }

    #[test]
    fn test_public_allows_every_session() {
        let rule = RouteRule::public("/courses");
        for session in all_sessions() {
            assert_eq!(guard(&session, &rule), Decision::Allow);
        }
    }

    #[test]
    fn test_authenticated_allows_any_role() {
        let rule = RouteRule::authenticated("/profile", "/login");
        for role in Role::ALL {
            assert!(guard(&session_as(Some(role)), &rule).is_allowed());
        }
        assert_eq!(
            guard(&session_as(None), &rule),
            Decision::Redirect {
                to: "/login".to_string(),
                reason: Denial::Unauthenticated,
            }
        );
    }

    #[test]
    fn test_impersonated_viewer_is_checked() {
        let mut session = session_as(Some(Role::Admin));
        session.impersonate(user("client", Role::Client)).unwrap();

        let admin_rule = RouteRule::role("/admin", Role::Admin, "/");
        assert_eq!(
            guard(&session, &admin_rule).denial(),
            Some(Denial::RoleMismatch {
                required: Role::Admin,
                actual: Role::Client,
            })
        );
    }

    #[test]
    fn test_decision_json() {
        let json = serde_json::to_value(Decision::Redirect {
            to: "/".to_string(),
            reason: Denial::RoleMismatch {
                required: Role::Coach,
                actual: Role::Client,
            },
        })
        .unwrap();
        assert_eq!(json["decision"], "redirect");
        assert_eq!(json["to"], "/");
        assert_eq!(json["reason"]["kind"], "role_mismatch");
        assert_eq!(json["reason"]["required"], "COACH");

        let json = serde_json::to_value(Decision::Allow).unwrap();
        assert_eq!(json["decision"], "allow");
    }
}
