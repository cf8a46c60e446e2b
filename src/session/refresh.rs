//! Single in-flight token refresh
//!
//! Concurrent callers that hit an expired token all hold the same stale
//! token. They serialize on one lock; the first one calls the refresh
//! endpoint, the rest find the rotation already recorded and reuse it.

use std::future::Future;

use tokio::sync::Mutex;

use super::SessionStore;
use crate::error::Result;

/// Last completed rotation: the stale token and what replaced it.
#[derive(Debug, Clone)]
struct Rotation {
    from: String,
    to: String,
}

/// Coalesces concurrent refreshes of the same stale token.
#[derive(Debug, Default)]
pub struct RefreshGate {
    last: Mutex<Option<Rotation>>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exchange `stale` for a fresh token, calling `fetch` at most once per stale token.
    ///
    /// The fresh token is persisted to `session` before it is returned.
    pub async fn refresh<F, Fut>(&self, session: &SessionStore, stale: &str, fetch: F) -> Result<String>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let mut last = self.last.lock().await;

        if let Some(rotation) = last.as_ref().filter(|r| r.from == stale) {
            log::debug!("Token already refreshed by a concurrent caller");
            // A 401 elsewhere may have cleared the store in the meantime
            if session.get_token().as_deref() != Some(rotation.to.as_str()) {
                session.save_token(&rotation.to)?;
            }
            return Ok(rotation.to.clone());
        }

        log::debug!("Refreshing bearer token");
        let fresh = fetch(stale.to_string()).await?;
        session.save_token(&fresh)?;

        *last = Some(Rotation {
            from: stale.to_string(),
            to: fresh.clone(),
        });

        Ok(fresh)
    }
}
