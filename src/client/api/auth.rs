//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{ProfileUpdate, Role, SignupRequest, UserProfile};
use crate::error::Result;

/// Authentication and profile operations
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Sign in with email and password.
    ///
    /// Persists the token, then fetches and caches the profile.
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile>;

    /// Create an account.
    ///
    /// Returns the new profile when the backend signs the user in right away,
    /// `None` when it only confirms the account.
    async fn signup(&self, request: &SignupRequest) -> Result<Option<UserProfile>>;

    /// Exchange a Google credential for a platform session
    async fn google_oauth(&self, google_token: &str, role: Role) -> Result<UserProfile>;

    /// Fetch the signed-in user's profile and refresh the cached copy
    async fn get_profile(&self) -> Result<UserProfile>;

    /// Update the profile, refreshing an expired token once if needed
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile>;

    /// Exchange the stored token for a fresh one
    async fn refresh_token(&self) -> Result<String>;
}
