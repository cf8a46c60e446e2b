//! Request lifetimes tied to a mounted view
//!
//! A view runs its calls through a [`RequestScope`]. Unmounting the view
//! (or dropping the scope) aborts whatever is still in flight, and results
//! that arrive afterwards are discarded instead of reaching a dead view.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use futures::future::{AbortHandle, Abortable};

use crate::error::{ApiError, Result};

#[derive(Debug, Default)]
pub struct RequestScope {
    unmounted: AtomicBool,
    next_id: AtomicU64,
    handles: Mutex<HashMap<u64, AbortHandle>>,
}

/// Releases a call's abort handle once the call settles or is dropped.
struct InFlight<'a> {
    scope: &'a RequestScope,
    id: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.scope.handles().remove(&self.id);
    }
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        !self.unmounted.load(Ordering::SeqCst)
    }

    /// Calls started through this scope that have not settled yet
    pub fn in_flight(&self) -> usize {
        self.handles().len()
    }

    /// Run `fut` unless the scope is unmounted before it completes.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if !self.is_mounted() {
            return Err(ApiError::Cancelled.into());
        }

        let (handle, registration) = AbortHandle::new_pair();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handles().insert(id, handle);
        let _in_flight = InFlight { scope: self, id };

        let outcome = Abortable::new(fut, registration).await;

        match outcome {
            Ok(_) if !self.is_mounted() => {
                log::debug!("Discarding result for unmounted view");
                Err(ApiError::Cancelled.into())
            }
            Ok(result) => result,
            Err(_aborted) => Err(ApiError::Cancelled.into()),
        }
    }

    /// Abort every in-flight call and refuse new ones.
    pub fn unmount(&self) {
        if self.unmounted.swap(true, Ordering::SeqCst) {
            return;
        }
        let mut handles = self.handles();
        log::debug!("Unmounting view, aborting {} calls", handles.len());
        for (_, handle) in handles.drain() {
            handle.abort();
        }
    }

    fn handles(&self) -> MutexGuard<'_, HashMap<u64, AbortHandle>> {
        self.handles.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_passes_result_through() {
        let scope = RequestScope::new();
        let value = scope.run(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);

        let err = scope
            .run(async { Err::<(), _>(ApiError::NotFound("x".into()).into()) })
            .await
            .unwrap_err();
        assert_eq!(err.as_api(), Some(&ApiError::NotFound("x".into())));
    }

    #[tokio::test]
    async fn test_unmount_aborts_in_flight_call() {
        let scope = Arc::new(RequestScope::new());
        let runner = Arc::clone(&scope);

        let task = tokio::spawn(async move {
            runner
                .run(async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok("late")
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        scope.unmount();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.as_api(), Some(&ApiError::Cancelled));
    }

    #[tokio::test]
    async fn test_unmounted_scope_refuses_new_calls() {
        let scope = RequestScope::new();
        scope.unmount();
        assert!(!scope.is_mounted());

        let err = scope.run(async { Ok(1) }).await.unwrap_err();
        assert_eq!(err.as_api(), Some(&ApiError::Cancelled));

        // Unmounting twice is harmless
        scope.unmount();
    }

    #[tokio::test]
    async fn test_settled_calls_release_their_handles() {
        let scope = RequestScope::new();
        for i in 0..50 {
            scope.run(async move { Ok(i) }).await.unwrap();
        }
        let _ = scope
            .run(async { Err::<(), _>(ApiError::NotFound("x".into()).into()) })
            .await;
        assert_eq!(scope.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_in_flight_counts_pending_call() {
        let scope = Arc::new(RequestScope::new());
        let runner = Arc::clone(&scope);

        let task = tokio::spawn(async move {
            runner
                .run(async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    Ok(())
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(scope.in_flight(), 1);

        task.await.unwrap().unwrap();
        assert_eq!(scope.in_flight(), 0);
    }
}
