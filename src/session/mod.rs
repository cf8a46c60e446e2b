//! Local session: bearer token and cached user profile
//!
//! Every component that needs to know who is signed in goes through
//! [`SessionStore`]. It is cheap to clone; clones share the same backing store.

pub mod refresh;
pub mod storage;
pub mod token;

use std::sync::Arc;

use crate::client::models::UserProfile;
use crate::error::{Result, StorageError};

pub use refresh::RefreshGate;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key of the cached profile
pub const USER_KEY: &str = "user";

/// Token and profile persistence over a [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_token", &self.get_token().is_some())
            .field("has_user", &self.store.get(USER_KEY).is_some())
            .finish()
    }
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// A session backed by an in-process store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn save_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token)?;
        Ok(())
    }

    pub fn get_token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn remove_token(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        Ok(())
    }

    pub fn save_user(&self, user: &UserProfile) -> Result<()> {
        let json =
            serde_json::to_string(user).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.store.set(USER_KEY, &json)?;
        Ok(())
    }

    /// The cached profile. An unreadable entry is reported as absent.
    pub fn get_user(&self) -> Option<UserProfile> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Ignoring unreadable cached profile: {}", e);
                None
            }
        }
    }

    pub fn remove_user(&self) -> Result<()> {
        self.store.remove(USER_KEY)?;
        Ok(())
    }

    /// True when a token is stored and passes the client-side checks.
    ///
    /// An invalid token is left in place; callers decide whether to log out.
    pub fn is_logged_in(&self) -> bool {
        self.get_token().is_some_and(|t| token::is_valid(&t))
    }

    /// Clear token and cached profile.
    pub fn logout(&self) -> Result<()> {
        log::debug!("Clearing local session");
        self.remove_token()?;
        self.remove_user()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Role;
    use crate::session::token::tests::make_token;
    use chrono::Utc;

    fn student() -> UserProfile {
        UserProfile {
            id: 3,
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::Student,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let session = SessionStore::in_memory();
        assert_eq!(session.get_token(), None);

        session.save_token("abc").unwrap();
        assert_eq!(session.get_token().as_deref(), Some("abc"));

        session.remove_token().unwrap();
        assert_eq!(session.get_token(), None);
    }

    #[test]
    fn test_user_round_trip_keeps_extra_fields() {
        let session = SessionStore::in_memory();
        let mut user = student();
        user.extra
            .insert("university".to_string(), serde_json::json!("IIT"));

        session.save_user(&user).unwrap();
        let cached = session.get_user().unwrap();
        assert_eq!(cached, user);
        assert_eq!(cached.extra["university"], "IIT");
    }

    #[test]
    fn test_corrupt_user_reads_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set(USER_KEY, "{not json").unwrap();
        let session = SessionStore::new(store);
        assert!(session.get_user().is_none());
    }

    #[test]
    fn test_is_logged_in_requires_valid_token() {
        let session = SessionStore::in_memory();
        assert!(!session.is_logged_in());

        let expired = make_token(&serde_json::json!({ "exp": Utc::now().timestamp() - 10 }));
        session.save_token(&expired).unwrap();
        assert!(!session.is_logged_in());
        // The predicate does not clear anything
        assert_eq!(session.get_token().as_deref(), Some(expired.as_str()));

        let fresh = make_token(&serde_json::json!({ "exp": Utc::now().timestamp() + 3600 }));
        session.save_token(&fresh).unwrap();
        assert!(session.is_logged_in());
    }

    #[test]
    fn test_logout_clears_both_entries() {
        let session = SessionStore::in_memory();
        session.save_token("abc").unwrap();
        session.save_user(&student()).unwrap();

        session.logout().unwrap();
        assert!(session.get_token().is_none());
        assert!(session.get_user().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionStore::in_memory();
        let other = session.clone();
        session.save_token("shared").unwrap();
        assert_eq!(other.get_token().as_deref(), Some("shared"));
    }
}
