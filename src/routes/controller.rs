//! Path navigation: parse, guard, then render or redirect

use super::{DASHBOARD_PATH, GuardOutcome, LOGIN_PATH, Route, guard};
use crate::client::models::UserProfile;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Protected route without a cached profile
    Unauthenticated,
    /// Cached profile has a role the route does not allow
    Forbidden,
    /// Login or signup opened while a session is active
    AlreadySignedIn,
}

impl RedirectReason {
    pub fn describe(&self) -> &'static str {
        match self {
            RedirectReason::Unauthenticated => "Sign in to view this page",
            RedirectReason::Forbidden => "This page is not available for your role",
            RedirectReason::AlreadySignedIn => "Already signed in",
        }
    }
}

/// Where a navigation ends up
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// The route may be shown; `user` is the cached profile, if any
    Render {
        route: Route,
        user: Option<UserProfile>,
    },
    Redirect {
        to: &'static str,
        reason: RedirectReason,
    },
    NotFound {
        path: String,
    },
}

/// Decides what a path shows using only the local session.
///
/// Navigation never touches the network; a view loads its data only after
/// it receives [`Navigation::Render`].
#[derive(Debug, Clone)]
pub struct RouteController {
    session: SessionStore,
}

impl RouteController {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        let Some(route) = Route::parse(path) else {
            log::debug!("No route for {}", path);
            return Navigation::NotFound {
                path: path.to_string(),
            };
        };

        let profile = self.session.get_user();

        if matches!(route, Route::Login | Route::Signup)
            && profile.is_some()
            && self.session.is_logged_in()
        {
            return Navigation::Redirect {
                to: DASHBOARD_PATH,
                reason: RedirectReason::AlreadySignedIn,
            };
        }

        let navigation = match guard(profile, route.access()) {
            GuardOutcome::Public(user) => Navigation::Render { route, user },
            GuardOutcome::Ready(user) => Navigation::Render {
                route,
                user: Some(user),
            },
            GuardOutcome::Unauthenticated => Navigation::Redirect {
                to: LOGIN_PATH,
                reason: RedirectReason::Unauthenticated,
            },
            GuardOutcome::Forbidden(user) => {
                log::debug!("{} may not open {}", user.role, route);
                Navigation::Redirect {
                    to: DASHBOARD_PATH,
                    reason: RedirectReason::Forbidden,
                }
            }
        };

        log::debug!("Navigate {} -> {:?}", route, navigation_kind(&navigation));
        navigation
    }
}

fn navigation_kind(navigation: &Navigation) -> &'static str {
    match navigation {
        Navigation::Render { .. } => "render",
        Navigation::Redirect { .. } => "redirect",
        Navigation::NotFound { .. } => "not found",
    }
}
