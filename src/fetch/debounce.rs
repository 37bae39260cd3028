//! Cancellable value debouncing
//!
//! Delays propagation of a rapidly-changing value until it has been stable
//! for the configured interval. Each `schedule` supersedes the previous one,
//! so under continuous change nothing is emitted at all. The pending timer
//! is an explicit handle: superseded or cancelled timers are aborted, and
//! dropping the debouncer aborts whatever is still pending, so no callback
//! ever fires after teardown.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle for one scheduled emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceToken(u64);

/// Debounces values of type `T` onto a channel
///
/// Values are emitted on the receiver returned by [`Debouncer::new`] once
/// they have been stable for the full delay.
pub struct Debouncer<T> {
    delay: Duration,
    next_token: u64,
    pending: Option<(u64, JoinHandle<()>)>,
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its settled values arrive on
    #[must_use]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                next_token: 0,
                pending: None,
                tx,
            },
            rx,
        )
    }

    /// Schedule a value, superseding any pending one
    ///
    /// The value is emitted after the configured delay unless a newer value
    /// is scheduled or the returned token is cancelled first.
    pub fn schedule(&mut self, value: T) -> DebounceToken {
        self.abort_pending();
        self.next_token += 1;
        let token = self.next_token;
        let tx = self.tx.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver side may already be gone during teardown
            let _ = tx.send(value);
        });
        self.pending = Some((token, handle));
        DebounceToken(token)
    }

    /// Cancel a scheduled emission
    ///
    /// A token that has already been superseded or has fired is a no-op.
    pub fn cancel(&mut self, token: DebounceToken) {
        if let Some((pending_token, _)) = &self.pending
            && *pending_token == token.0
        {
            self.abort_pending();
        }
    }

    /// True while an emission is scheduled and not yet fired
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|(_, handle)| !handle.is_finished())
    }

    fn abort_pending(&mut self) {
        if let Some((_, handle)) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.pending.take() {
            handle.abort();
        }
    }
}
