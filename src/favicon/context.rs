//! Request-scoped cancellation and deadline
//!
//! One `FetchContext` is created per incoming request and cloned into every
//! unit of work spawned for it. Cancelling any clone, or letting the deadline
//! pass, signals all of them.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Shared cancellation signal with an optional deadline
#[derive(Debug, Clone)]
pub struct FetchContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl FetchContext {
    /// Creates a context that only ends when cancelled
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Creates a context that also ends once `timeout` has elapsed
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Cancels this context and every clone of it
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true if the context was cancelled or its deadline has passed
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
            || self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Resolves once the context is cancelled or its deadline passes
    pub async fn done(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => {}
                    _ = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => self.token.cancelled().await,
        }
    }

    /// Returns a guard that cancels the context when dropped
    ///
    /// HTTP handlers hold one so that a dropped request (client gone, outer
    /// timeout) stops the fetches it spawned.
    pub fn drop_guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::new()
    }
}
