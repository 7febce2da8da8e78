//! Route guard

use serde::Serialize;

use studybuddy_session::Session;

use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "route", rename_all = "snake_case")]
pub enum GuardOutcome {
    /// Token verification still pending
    Loading,
    Render(Route),
    Redirect(Route),
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn resolve(route: Route, session: &Session) -> GuardOutcome {
        if session.loading && (route.requires_auth() || route.is_auth_page()) {
            return GuardOutcome::Loading;
        }

        let authenticated = session.is_authenticated();

        let outcome = if route.requires_auth() && !authenticated {
            GuardOutcome::Redirect(Route::Login)
        } else if route.is_auth_page() && authenticated {
            GuardOutcome::Redirect(Route::Dashboard)
        } else {
            GuardOutcome::Render(route)
        };

        if let GuardOutcome::Redirect(target) = outcome {
            tracing::debug!(from = %route, to = %target, "Route redirected");
        }

        outcome
    }
}
