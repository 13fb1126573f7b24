use std::sync::Arc;
use tokio::sync::watch;

/// Shared cancellation signal for a pending ask.
///
/// Clones observe the same signal. Once cancelled a token stays cancelled.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    signal: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            signal: Arc::new(signal),
        }
    }

    pub fn cancel(&self) {
        self.signal.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow()
    }

    /// Resolves once `cancel` has been called on any clone.
    pub async fn cancelled(&self) {
        let mut rx = self.signal.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// True when both handles share one signal.
    pub fn same_as(&self, other: &CancellationToken) -> bool {
        Arc::ptr_eq(&self.signal, &other.signal)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
