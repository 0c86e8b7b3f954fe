//! Cancellation token
//!
//! A single-use token shared between the executor, the tab context,
//! and the UI's cancel button. The first trigger records who fired it
//! (user or timeout) exactly once; every later trigger is a no-op, so
//! a timer going off after a manual cancel can never relabel the
//! settlement.

use std::sync::{Arc, OnceLock};

use tokio::sync::watch;

/// Who triggered the cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The user hit cancel (or the request was superseded).
    User,
    /// The timeout timer fired.
    Timeout,
}

#[derive(Debug)]
struct Inner {
    reason: OnceLock<CancelReason>,
    triggered: watch::Sender<bool>,
}

/// A level-triggered, single-use cancellation handle.
///
/// Clones share the same state. Cancelling an already-cancelled token
/// is a no-op and the originally recorded reason stays authoritative.
#[derive(Debug, Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    /// Creates a fresh, untriggered token.
    #[must_use]
    pub fn new() -> Self {
        let (triggered, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                reason: OnceLock::new(),
                triggered,
            }),
        }
    }

    /// Triggers cancellation with the given reason.
    ///
    /// Returns true if this call was the one that triggered the token;
    /// false when it was already cancelled (the earlier reason wins).
    pub fn cancel(&self, reason: CancelReason) -> bool {
        if self.inner.reason.set(reason).is_ok() {
            let _ = self.inner.triggered.send(true);
            true
        } else {
            false
        }
    }

    /// Returns true once the token has been triggered.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.reason.get().is_some()
    }

    /// The reason recorded at trigger time, if triggered.
    #[must_use]
    pub fn reason(&self) -> Option<CancelReason> {
        self.inner.reason.get().copied()
    }

    /// Waits until the token is triggered.
    ///
    /// Returns immediately if it already was.
    pub async fn cancelled(&self) {
        let mut rx = self.inner.triggered.subscribe();
        while self.inner.reason.get().is_none() {
            if rx.changed().await.is_err() {
                // Sender lives as long as self; unreachable in practice.
                return;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_trigger_records_reason() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.cancel(CancelReason::User));
        assert_eq!(token.reason(), Some(CancelReason::User));
    }

    #[test]
    fn later_triggers_are_noops() {
        let token = CancelToken::new();
        assert!(token.cancel(CancelReason::Timeout));
        // A user cancel arriving right at the timeout boundary must not
        // relabel the settlement, and vice versa.
        assert!(!token.cancel(CancelReason::User));
        assert_eq!(token.reason(), Some(CancelReason::Timeout));
    }

    #[test]
    fn clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();
        token.cancel(CancelReason::User);
        assert!(clone.is_cancelled());
        assert_eq!(clone.reason(), Some(CancelReason::User));
    }

    #[tokio::test]
    async fn cancelled_wakes_waiters() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move {
            waiter.cancelled().await;
            waiter.reason()
        });

        token.cancel(CancelReason::Timeout);
        let reason = handle.await.unwrap_or(None);
        assert_eq!(reason, Some(CancelReason::Timeout));
    }

    #[tokio::test]
    async fn cancelled_returns_immediately_when_already_triggered() {
        let token = CancelToken::new();
        token.cancel(CancelReason::User);
        token.cancelled().await;
    }
}
