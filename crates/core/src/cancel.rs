//! Cooperative cancellation shared between a caller and the generation pipeline.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::AbortError;

/// Cancellation token threaded through every suspension point of a request.
///
/// Clones observe the same state. Nothing is interrupted forcibly: stages call
/// [`CancelSignal::check`] before launching new work.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Fire the signal. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// `Err(AbortError)` once the signal has fired.
    pub fn check(&self) -> Result<(), AbortError> {
        if self.is_cancelled() {
            Err(AbortError)
        } else {
            Ok(())
        }
    }

    /// Resolves when the signal fires.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // The sender lives as long as any clone of `self`, so this only
        // returns early if the value is already `true`.
        let _ = rx.wait_for(|fired| *fired).await;
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}
