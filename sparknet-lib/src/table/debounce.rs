//! Debounced text input
//!
//! Keeps the display value current on every keystroke but only forwards it
//! to the filtering side once the input has been quiet for the debounce
//! window. A new keystroke restarts the window.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Default quiescence window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Whether a propagation is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    PendingPropagation,
}

struct Pending {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Input wrapper that forwards its value after a quiet period.
///
/// Propagated values are sent on an unbounded channel owned by the host.
/// Scheduling spawns a Tokio task, so changes must happen inside a runtime.
/// Dropping the input cancels whatever is pending.
///
/// ```
/// use sparknet_lib::table::DebouncedInput;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (mut input, mut rx) = DebouncedInput::channel(String::new());
/// input.on_change("k".to_string());
/// input.on_change("kev".to_string());
/// assert_eq!(rx.recv().await.as_deref(), Some("kev"));
/// # }
/// ```
pub struct DebouncedInput<T> {
    value: T,
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    root: CancellationToken,
    pending: Option<Pending>,
}

impl<T> DebouncedInput<T>
where
    T: Clone + Send + 'static,
{
    /// Creates an input with the default window that sends on `tx`.
    pub fn new(initial: T, tx: mpsc::UnboundedSender<T>) -> Self {
        Self::with_delay(initial, DEFAULT_DEBOUNCE, tx)
    }

    pub fn with_delay(initial: T, delay: Duration, tx: mpsc::UnboundedSender<T>) -> Self {
        Self {
            value: initial,
            delay,
            tx,
            root: CancellationToken::new(),
            pending: None,
        }
    }

    /// Creates an input together with the receiving end of its channel.
    pub fn channel(initial: T) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(initial, tx), rx)
    }

    /// The value currently displayed.
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> DebounceState {
        if self.is_pending() {
            DebounceState::PendingPropagation
        } else {
            DebounceState::Idle
        }
    }

    /// Returns `true` while a propagation is scheduled and not yet sent.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| !p.token.is_cancelled() && !p.handle.is_finished())
    }

    /// Handles a keystroke.
    ///
    /// The display value changes at once. Any scheduled propagation is
    /// cancelled and a new one is scheduled for this value.
    pub fn on_change(&mut self, value: T) {
        self.value = value.clone();
        self.cancel_pending();

        let token = self.root.child_token();
        let tx = self.tx.clone();
        let delay = self.delay;
        let guard = token.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = guard.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if tx.send(value).is_err() {
                        log::warn!("Debounced value dropped, receiver is gone");
                    }
                }
            }
        });

        self.pending = Some(Pending { token, handle });
    }

    /// Replaces the display value after an external change.
    ///
    /// The new value is not propagated and anything pending is dropped.
    pub fn sync(&mut self, value: T) {
        self.value = value;
        self.cancel_pending();
    }

    /// Cancels pending work. Later changes only update the display value.
    pub fn teardown(&mut self) {
        self.root.cancel();
        self.pending = None;
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
        }
    }
}

impl<T> Drop for DebouncedInput<T> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_state_follows_timer() {
        let (mut input, mut rx) = DebouncedInput::channel(String::new());
        assert_eq!(input.state(), DebounceState::Idle);

        input.on_change("a".to_string());
        assert_eq!(input.state(), DebounceState::PendingPropagation);
        assert_eq!(input.value(), "a");

        assert_eq!(rx.recv().await.as_deref(), Some("a"));
        tokio::task::yield_now().await;
        assert_eq!(input.state(), DebounceState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_drops_pending() {
        let (mut input, mut rx) = DebouncedInput::channel(String::new());
        input.on_change("kev".to_string());
        input.sync(String::new());

        assert!(!input.is_pending());
        assert_eq!(input.value(), "");
        tokio::time::sleep(DEFAULT_DEBOUNCE * 2).await;
        assert!(rx.try_recv().is_err());
    }
}
