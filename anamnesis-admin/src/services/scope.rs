//! View-scoped requests
//!
//! Every controller owns a [`ViewScope`]. Requests started through it are
//! abandoned once the view is gone, so a late response can never update
//! state that nobody is looking at any more.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Lifetime of a single view
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    cancel: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// End the scope. In-flight and future `run` calls resolve to `None`.
    pub fn end(&self) {
        self.cancel.cancel();
    }

    pub fn is_ended(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `request` until it completes or the scope ends
    pub async fn run<F: Future>(&self, request: F) -> Option<F::Output> {
        if self.is_ended() {
            return None;
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!("View scope ended, dropping response");
                None
            }
            output = request => Some(output),
        }
    }
}
