//! Role guard shared by every route

use super::Access;
use crate::client::models::UserProfile;

/// Result of checking a cached profile against a route's [`Access`].
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Route is public; the profile is passed along when there is one
    Public(Option<UserProfile>),
    /// Protected route and nobody is signed in
    Unauthenticated,
    /// Signed in, but with a role the route does not allow
    Forbidden(UserProfile),
    /// Signed in with an allowed role
    Ready(UserProfile),
}

/// Decide whether `profile` may open a route with `access`.
///
/// Pure: reads nothing but its arguments and makes no calls.
pub fn guard(profile: Option<UserProfile>, access: Access) -> GuardOutcome {
    match (access, profile) {
        (Access::Public, profile) => GuardOutcome::Public(profile),
        (_, None) => GuardOutcome::Unauthenticated,
        (access, Some(user)) if access.allows(user.role) => GuardOutcome::Ready(user),
        (_, Some(user)) => GuardOutcome::Forbidden(user),
    }
}
