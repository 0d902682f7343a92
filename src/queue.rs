//! Fixed-capacity FIFO shared between customers and barbers.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard};

/* ---------- */

/// A bounded, thread-safe FIFO with fail-fast enqueue and blocking dequeue.
///
/// Producers never wait on it: [`try_enqueue`] hands the item back when every seat is taken.
/// Consumers sleep in [`dequeue_blocking`] until an item arrives or the queue is shut down.
///
/// Every item accepted by the queue stays *in flight* until a consumer calls [`acknowledge`],
/// which lets [`wait_drained`] block until all accepted work has actually been processed.
///
/// [`try_enqueue`]: Self::try_enqueue
/// [`dequeue_blocking`]: Self::dequeue_blocking
/// [`acknowledge`]: Self::acknowledge
/// [`wait_drained`]: Self::wait_drained
pub struct BoundedWorkQueue<T> {
    state: Mutex<State<T>>,
    available: Condvar,
    drained: Condvar,
}

struct State<T> {
    items: VecDeque<T>,
    capacity: usize,
    in_flight: usize,
    closed: bool,
}

impl<T> BoundedWorkQueue<T> {
    /// Creates an empty queue holding at most `capacity` items.
    ///
    /// A zero capacity makes a queue that rejects everything.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(State {
                items: VecDeque::with_capacity(capacity),
                capacity,
                in_flight: 0,
                closed: false,
            }),
            available: Condvar::new(),
            drained: Condvar::new(),
        }
    }

    /// Appends `item` if a seat is free, waking one sleeping consumer.
    ///
    /// Never blocks. The item is handed back when the queue is full or shut down.
    pub fn try_enqueue(&self, item: T) -> Result<(), TryEnqueueError<T>> {
        let mut state = self.lock();
        if state.closed {
            return Err(TryEnqueueError::Closed(item));
        }
        if state.items.len() >= state.capacity {
            return Err(TryEnqueueError::Full(item));
        }

        state.items.push_back(item);
        state.in_flight += 1;
        // Notified under the lock: a consumer is either already waiting or will see the item.
        self.available.notify_one();
        Ok(())
    }

    /// Blocks until the oldest item can be taken, or returns `None` once the queue is
    /// shut down and empty.
    pub fn dequeue_blocking(&self) -> Option<T> {
        let mut state = self.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                return Some(item);
            }
            if state.closed {
                return None;
            }
            state = self
                .available
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    /// Records that one previously dequeued item has been processed.
    ///
    /// Wakes [`wait_drained`](Self::wait_drained) callers when nothing is left in flight.
    /// Extra acknowledgements are ignored.
    pub fn acknowledge(&self) {
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        if state.in_flight == 0 {
            self.drained.notify_all();
        }
    }

    /// Blocks until every accepted item has been acknowledged.
    pub fn wait_drained(&self) {
        let mut state = self.lock();
        while state.in_flight > 0 {
            state = self
                .drained
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    /// Closes the queue and wakes every sleeping consumer.
    ///
    /// Items still waiting are handed out before consumers see `None`. Idempotent.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        state.closed = true;
        self.available.notify_all();
    }

    /// Number of items waiting to be claimed.
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Returns `true` if no item is waiting.
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Maximum number of waiting items.
    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    /// Number of accepted items not yet acknowledged, waiting or being processed.
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    // Critical sections never run user code, a poisoned lock still guards a consistent state.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/* ---------- */

/// Why [`BoundedWorkQueue::try_enqueue`] refused an item, which is handed back.
#[derive(PartialEq, Eq)]
pub enum TryEnqueueError<T> {
    /// Every seat was taken.
    Full(T),
    /// The queue was shut down.
    Closed(T),
}

impl<T> TryEnqueueError<T> {
    /// Returns the refused item.
    #[inline]
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(item) | Self::Closed(item) => item,
        }
    }

    /// Returns `true` if the item was refused because the queue was full.
    #[inline]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }
}

impl<T> fmt::Debug for TryEnqueueError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(_) => f.write_str("Full(..)"),
            Self::Closed(_) => f.write_str("Closed(..)"),
        }
    }
}

impl<T> fmt::Display for TryEnqueueError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(_) => f.write_str("enqueuing on a full queue"),
            Self::Closed(_) => f.write_str("enqueuing on a closed queue"),
        }
    }
}

impl<T> std::error::Error for TryEnqueueError<T> {}

/* ---------- */
