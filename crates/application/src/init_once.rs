//! One-shot asynchronous initialization
//!
//! Wraps an expensive load (e.g. the autocomplete provider) so it runs at
//! most once per process. Concurrent callers share the in-flight attempt and
//! the outcome is cached for the life of the object, failure included.

use std::{fmt, future::Future};

use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::debug;

/// Observable initialization state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitState {
    /// Nobody has asked yet
    Uninitialized,
    /// A load is in flight
    Loading,
    /// Load succeeded
    Ready,
    /// Load failed; the reason is kept for diagnostics
    Failed(String),
}

impl InitState {
    /// Whether a terminal state has been reached
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }
}

/// Initialize-once state object
pub struct InitOnce {
    name: &'static str,
    outcome: OnceCell<Result<(), String>>,
    state: Mutex<InitState>,
}

impl fmt::Debug for InitOnce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitOnce")
            .field("name", &self.name)
            .field("state", &*self.state.lock())
            .finish()
    }
}

impl InitOnce {
    /// Create an uninitialized object; `name` only appears in logs
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            outcome: OnceCell::new(),
            state: Mutex::new(InitState::Uninitialized),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> InitState {
        self.state.lock().clone()
    }

    /// Whether initialization finished successfully
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.state.lock() == InitState::Ready
    }

    /// Run `init` unless an outcome already exists, then return the outcome.
    ///
    /// Callers arriving while a load is in flight wait for it instead of
    /// starting another one.
    ///
    /// # Errors
    ///
    /// Returns the cached failure reason if the load failed.
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<(), String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), String>>,
    {
        self.outcome
            .get_or_init(|| async move {
                debug!(name = self.name, "Starting initialization");
                *self.state.lock() = InitState::Loading;
                let result = init().await;
                *self.state.lock() = match &result {
                    Ok(()) => InitState::Ready,
                    Err(reason) => InitState::Failed(reason.clone()),
                };
                result
            })
            .await
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use std::time::Duration;

    use super::*;

    #[test]
    fn starts_uninitialized() {
        let once = InitOnce::new("test");
        assert_eq!(once.state(), InitState::Uninitialized);
        assert!(!once.state().is_terminal());
        assert!(format!("{once:?}").contains("Uninitialized"));
    }

    #[tokio::test]
    async fn runs_loader_once() {
        let once = InitOnce::new("test");
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let result = once
                .get_or_init(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .await;
            assert!(result.is_ok());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(once.is_ready());
    }

    #[tokio::test]
    async fn failure_is_cached() {
        let once = InitOnce::new("test");
        let calls = AtomicUsize::new(0);

        let first = once
            .get_or_init(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("bad credential".to_string())
            })
            .await;
        let second = once
            .get_or_init(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await;

        assert_eq!(first, Err("bad credential".to_string()));
        assert_eq!(second, Err("bad credential".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(once.state(), InitState::Failed("bad credential".into()));
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_load() {
        let once = Arc::new(InitOnce::new("test"));
        let calls = Arc::new(AtomicUsize::new(0));

        let load = |once: Arc<InitOnce>, calls: Arc<AtomicUsize>| async move {
            once.get_or_init(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(())
            })
            .await
        };

        let (a, b, c) = tokio::join!(
            load(Arc::clone(&once), Arc::clone(&calls)),
            load(Arc::clone(&once), Arc::clone(&calls)),
            load(Arc::clone(&once), Arc::clone(&calls)),
        );

        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reports_loading_while_in_flight() {
        let once = Arc::new(InitOnce::new("test"));
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let task = {
            let once = Arc::clone(&once);
            tokio::spawn(async move {
                once.get_or_init(|| async move {
                    let _ = rx.await;
                    Ok(())
                })
                .await
            })
        };

        while once.state() == InitState::Uninitialized {
            tokio::task::yield_now().await;
        }
        assert_eq!(once.state(), InitState::Loading);

        tx.send(()).unwrap();
        assert!(task.await.unwrap().is_ok());
        assert_eq!(once.state(), InitState::Ready);
    }
}
