use super::SubmitOutcome;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

static TOKEN_SEQ: AtomicU64 = AtomicU64::new(0);

/// Mint a single-use correlation token. Unique within the process, and a
/// valid script identifier so the remote side can invoke it by name.
pub fn next_token() -> String {
    let seq = TOKEN_SEQ.fetch_add(1, Ordering::Relaxed);
    let nanos = Utc::now().timestamp_subsec_nanos();
    format!("cb_{}_{}_{}", std::process::id(), nanos, seq)
}

/// Pending-request table keyed by correlation token.
///
/// The wire contract has no native request/response pairing: the response
/// arrives as a script-style invocation of the token's name. Each call
/// registers a single-fire handler here before dispatch, and whichever path
/// terminates first (response, transport error, timeout) takes the handler
/// out of the table. Completing a token whose handler is already gone is a
/// no-op, so a late response after a timeout has no effect.
#[derive(Debug, Clone, Default)]
pub struct PendingRequests {
    inner: Arc<Mutex<HashMap<String, oneshot::Sender<SubmitOutcome>>>>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `token`. Must happen strictly before the
    /// request is dispatched so a fast response cannot arrive unrouted.
    pub fn register(&self, token: &str) -> oneshot::Receiver<SubmitOutcome> {
        let (tx, rx) = oneshot::channel();
        self.inner.lock().unwrap().insert(token.to_string(), tx);
        rx
    }

    /// Deliver the outcome for `token`. Returns false when the handler was
    /// already released (timed out, or completed by an earlier delivery).
    pub fn complete(&self, token: &str, outcome: SubmitOutcome) -> bool {
        let Some(tx) = self.inner.lock().unwrap().remove(token) else {
            return false;
        };
        tx.send(outcome).is_ok()
    }

    /// Drop the handler for `token` without firing it (the timeout path).
    /// Returns false when it was already gone.
    pub fn release(&self, token: &str) -> bool {
        self.inner.lock().unwrap().remove(token).is_some()
    }

    pub fn is_registered(&self, token: &str) -> bool {
        self.inner.lock().unwrap().contains_key(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submit::{RemoteResponse, SubmitError};
    use std::time::Duration;

    fn ok_response() -> SubmitOutcome {
        Ok(RemoteResponse {
            status: "success".to_string(),
            message: None,
        })
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = next_token();
        let b = next_token();
        assert_ne!(a, b);
        assert!(a.starts_with("cb_"));
    }

    #[tokio::test]
    async fn test_response_resolves_registered_handler() {
        let pending = PendingRequests::new();
        let rx = pending.register("cb_1");
        assert!(pending.is_registered("cb_1"));

        assert!(pending.complete("cb_1", ok_response()));
        let outcome = rx.await.unwrap();
        assert!(outcome.unwrap().is_success());
        assert!(!pending.is_registered("cb_1"));
    }

    #[tokio::test]
    async fn test_double_completion_is_a_noop() {
        let pending = PendingRequests::new();
        let rx = pending.register("cb_1");

        assert!(pending.complete("cb_1", ok_response()));
        // Second delivery finds the handler gone and does nothing.
        assert!(!pending.complete(
            "cb_1",
            Err(SubmitError::Remote("duplicate".to_string()))
        ));

        let outcome = rx.await.unwrap();
        assert!(outcome.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_completion_after_release_is_a_noop() {
        let pending = PendingRequests::new();
        let _rx = pending.register("cb_1");

        // Timeout path releases the handler without firing it.
        assert!(pending.release("cb_1"));
        assert!(!pending.release("cb_1"));
        assert!(!pending.complete("cb_1", ok_response()));
    }

    #[tokio::test]
    async fn test_completing_unknown_token_is_a_noop() {
        let pending = PendingRequests::new();
        assert!(!pending.complete("cb_never_registered", ok_response()));
    }

    #[tokio::test]
    async fn test_response_within_bound_resolves_exactly_once() {
        let pending = PendingRequests::new();
        let rx = pending.register("cb_1");

        let remote = pending.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            remote.complete("cb_1", ok_response());
        });

        let outcome = tokio::time::timeout(Duration::from_secs(1), rx)
            .await
            .expect("should resolve well before the bound")
            .unwrap();
        assert!(outcome.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_handlers_are_independent_per_token() {
        let pending = PendingRequests::new();
        let rx1 = pending.register("cb_1");
        let rx2 = pending.register("cb_2");

        pending.complete("cb_2", Err(SubmitError::Remote("boom".to_string())));
        assert!(pending.is_registered("cb_1"));

        let outcome = rx2.await.unwrap();
        assert_eq!(outcome, Err(SubmitError::Remote("boom".to_string())));

        pending.complete("cb_1", ok_response());
        assert!(rx1.await.unwrap().unwrap().is_success());
    }
}
