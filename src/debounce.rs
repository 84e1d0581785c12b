//! Quiet-period delivery of values
//!
//! Each `schedule` replaces the pending value; it is delivered on the channel
//! only after `wait` passes with no newer call.

use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

pub struct Debouncer<T> {
    wait: Duration,
    sender: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(wait: Duration) -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let debouncer = Self {
            wait,
            sender,
            pending: None,
        };
        (debouncer, receiver)
    }

    /// Must be called inside a tokio runtime
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        let sender = self.sender.clone();
        let wait = self.wait;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            // Receiver gone means the app is shutting down
            let _ = sender.send(value);
        }));
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_delivers_after_quiet_period() {
        let (mut debouncer, mut rx) = Debouncer::new(WAIT);
        debouncer.schedule("a@b.co");
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some("a@b.co"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_value_replaces_pending() {
        let (mut debouncer, mut rx) = Debouncer::new(WAIT);
        debouncer.schedule(1);
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.schedule(2);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(rx.recv().await, Some(2));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_value() {
        let (mut debouncer, mut rx) = Debouncer::new(WAIT);
        debouncer.schedule(7);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        tokio::time::sleep(WAIT * 2).await;
        assert!(rx.try_recv().is_err());
    }
}
