//! Single-fulfilment result handle.
//!
//! One extraction call can be resolved from several places: the analyzer
//! reporting success or failure, the analyzer dropping its sink, or the
//! timeout. Whichever settles first wins; every later attempt is a no-op.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::oneshot;

/// A value that can be settled exactly once from any thread.
pub struct Deferred<T> {
    settled: AtomicBool,
    sender: Mutex<Option<oneshot::Sender<T>>>,
}

impl<T> Deferred<T> {
    /// Create an unsettled handle and the receiver its value is delivered to.
    pub fn new() -> (Arc<Self>, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        let deferred = Self {
            settled: AtomicBool::new(false),
            sender: Mutex::new(Some(tx)),
        };
        (Arc::new(deferred), rx)
    }

    /// Settle with `value`.
    ///
    /// Returns `true` if this call settled the handle, `false` if it was
    /// already settled (the value is dropped).
    pub fn settle(&self, value: T) -> bool {
        if self.settled.swap(true, Ordering::AcqRel) {
            return false;
        }
        if let Some(tx) = self.sender.lock().take() {
            // Receiver gone means the caller stopped waiting; nothing to deliver to
            let _ = tx.send(value);
        }
        true
    }

    /// Whether a value has been accepted.
    pub fn is_settled(&self) -> bool {
        self.settled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_settle_wins() {
        let (deferred, rx) = Deferred::new();

        assert!(deferred.settle(1));
        assert!(!deferred.settle(2));
        assert!(deferred.is_settled());
        assert_eq!(rx.await.unwrap(), 1);
    }

    #[test]
    fn test_settle_after_receiver_dropped() {
        let (deferred, rx) = Deferred::<u8>::new();
        drop(rx);
        assert!(deferred.settle(7));
        assert!(!deferred.settle(8));
    }

    #[tokio::test]
    async fn test_concurrent_settles_resolve_once() {
        let (deferred, rx) = Deferred::new();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let deferred = Arc::clone(&deferred);
                tokio::spawn(async move { deferred.settle(i) })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert!(rx.await.is_ok());
    }
}
