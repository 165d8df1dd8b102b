//! Wait Queue
//!
//! "List diamonds" does not answer right away. Each request parks a oneshot
//! sender here and the next tick flushes the whole queue with one snapshot.

use tokio::sync::oneshot;

use crate::game::field::FieldSnapshot;

/// Receiving end of a parked list request.
pub type PendingList = oneshot::Receiver<FieldSnapshot>;

/// Result of a flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Waiters that received the snapshot.
    pub delivered: usize,
    /// Waiters whose receiver was already gone.
    pub abandoned: usize,
}

/// Parked list requests.
#[derive(Debug, Default)]
pub struct WaitQueue {
    waiting: Vec<oneshot::Sender<FieldSnapshot>>,
}

impl WaitQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a new request and hand back its receiver.
    pub fn enqueue(&mut self) -> PendingList {
        let (tx, rx) = oneshot::channel();
        self.waiting.push(tx);
        rx
    }

    /// Number of parked requests, abandoned ones included.
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    /// Whether nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Deliver `snapshot` to every parked request and empty the queue.
    pub fn flush(&mut self, snapshot: &FieldSnapshot) -> FlushReport {
        let mut report = FlushReport::default();
        for waiter in self.waiting.drain(..) {
            // A dropped receiver means the client went away
            if waiter.send(snapshot.clone()).is_ok() {
                report.delivered += 1;
            } else {
                report.abandoned += 1;
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::core::position::Position;
    use crate::game::diamond::{Color, Diamond};

    fn snapshot() -> FieldSnapshot {
        vec![Diamond::new(1, Position::new(20, 150), Color::new("#f00"))].into()
    }

    #[test]
    fn test_flush_delivers_same_snapshot() {
        let mut queue = WaitQueue::new();
        let mut a = queue.enqueue();
        let mut b = queue.enqueue();
        assert_eq!(queue.len(), 2);

        let snap = snapshot();
        let report = queue.flush(&snap);
        assert_eq!(report, FlushReport { delivered: 2, abandoned: 0 });
        assert!(queue.is_empty());

        let got_a = a.try_recv().unwrap();
        let got_b = b.try_recv().unwrap();
        assert!(Arc::ptr_eq(&got_a, &got_b));
        assert_eq!(got_a[0].id, 1);
    }

    #[test]
    fn test_dropped_receiver_is_abandoned() {
        let mut queue = WaitQueue::new();
        let gone = queue.enqueue();
        let mut kept = queue.enqueue();
        drop(gone);
        assert_eq!(queue.len(), 2);

        let report = queue.flush(&snapshot());
        assert_eq!(report, FlushReport { delivered: 1, abandoned: 1 });
        assert!(kept.try_recv().is_ok());
    }

    #[test]
    fn test_each_waiter_served_once() {
        let mut queue = WaitQueue::new();
        let mut rx = queue.enqueue();
        queue.flush(&snapshot());

        // Second flush has nobody left to serve
        let empty: FieldSnapshot = Vec::new().into();
        assert_eq!(queue.flush(&empty), FlushReport::default());
        assert_eq!(rx.try_recv().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_receiver_resolves_after_flush() {
        let mut queue = WaitQueue::new();
        let rx = queue.enqueue();
        queue.flush(&snapshot());
        let received = rx.await.unwrap();
        assert_eq!(received.len(), 1);
    }
}
