//! Single-flight coordination of token refreshes.

use tokio::sync::{Mutex, MutexGuard};

use ecomap_core::AccessToken;

/// Serialises refreshes so at most one refresh call is in flight.
///
/// Whoever holds the permit compares the token its request was rejected
/// with against the stored one (see [`superseded`]). A caller queued behind
/// a successful refresh then finds a newer token and skips the network.
#[derive(Debug, Default)]
pub(crate) struct RefreshGate {
    lock: Mutex<()>,
}

impl RefreshGate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the refresh endpoint.
    pub(crate) async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}

/// Whether `stored` replaced the token a rejected request carried.
///
/// A request that carried no token never counts as superseded: nothing
/// tells us the stored token is any fresher than what the server saw.
pub(crate) fn superseded(carried: Option<&str>, stored: Option<&AccessToken>) -> bool {
    match (carried, stored) {
        (Some(carried), Some(stored)) => carried != stored.as_str(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[test]
    fn rejected_current_token_is_not_superseded() {
        let stored = AccessToken::new("A2");
        assert!(!superseded(Some("A2"), Some(&stored)));
    }

    #[test]
    fn newer_stored_token_supersedes() {
        let stored = AccessToken::new("A2");
        assert!(superseded(Some("A1"), Some(&stored)));
    }

    #[test]
    fn unauthenticated_request_is_never_superseded() {
        let stored = AccessToken::new("A1");
        assert!(!superseded(None, Some(&stored)));
        assert!(!superseded(None, None));
        assert!(!superseded(Some("A1"), None));
    }

    #[tokio::test]
    async fn permits_are_exclusive() {
        let gate = Arc::new(RefreshGate::new());
        let holders = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let gate = gate.clone();
                let holders = holders.clone();
                tokio::spawn(async move {
                    let _permit = gate.acquire().await;
                    assert_eq!(holders.fetch_add(1, Ordering::SeqCst), 0);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    holders.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }
    }
}
