//! Debounced values
//!
//! A [`Debounced`] value only takes effect once input has been stable for
//! a fixed window. New input restarts the window.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct Debounced<T> {
    window: Duration,
    settled: T,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, window: Duration) -> Self {
        Self {
            window,
            settled: initial,
            pending: None,
        }
    }

    /// Record new input, superseding anything still pending
    pub fn set(&mut self, value: T) {
        if self.pending.is_none() && value == self.settled {
            return;
        }
        let deadline = Instant::now() + self.window;
        self.pending = Some((value, deadline));
    }

    /// Latest input, settled or not
    pub fn latest(&self) -> &T {
        self.pending
            .as_ref()
            .map(|(value, _)| value)
            .unwrap_or(&self.settled)
    }

    /// The effective value, promoting pending input whose window has passed
    pub fn current(&mut self) -> &T {
        let due = matches!(&self.pending, Some((_, deadline)) if Instant::now() >= *deadline);
        if due {
            if let Some((value, _)) = self.pending.take() {
                self.settled = value;
            }
        }
        &self.settled
    }

    /// Last effective value without promoting anything
    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait until pending input takes effect and return the effective value
    pub async fn settle(&mut self) -> &T {
        if let Some(deadline) = self.pending.as_ref().map(|(_, deadline)| *deadline) {
            tokio::time::sleep_until(deadline).await;
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(600);

    #[tokio::test(start_paused = true)]
    async fn test_applies_after_window() {
        let mut term = Debounced::new(String::new(), WINDOW);
        term.set("flu".to_string());

        assert_eq!(term.latest(), "flu");
        assert_eq!(term.current(), "");

        tokio::time::advance(Duration::from_millis(599)).await;
        assert_eq!(term.current(), "");

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(term.current(), "flu");
        assert!(!term.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_input_restarts_window() {
        let mut term = Debounced::new(String::new(), WINDOW);
        term.set("f".to_string());

        tokio::time::advance(Duration::from_millis(400)).await;
        term.set("fl".to_string());

        tokio::time::advance(Duration::from_millis(400)).await;
        assert_eq!(term.current(), "");

        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(term.current(), "fl");
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_for_deadline() {
        let mut term = Debounced::new(0, WINDOW);
        term.set(3);

        let start = Instant::now();
        assert_eq!(*term.settle().await, 3);
        assert!(start.elapsed() >= WINDOW);
    }

    #[tokio::test(start_paused = true)]
    async fn test_setting_settled_value_is_noop() {
        let mut term = Debounced::new(1, WINDOW);
        term.set(1);
        assert!(!term.is_pending());
        assert_eq!(*term.settled(), 1);
    }
}
