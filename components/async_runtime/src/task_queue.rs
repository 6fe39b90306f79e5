//! Microtask and timer queue management.
//!
//! This module provides the two queues driven by the virtual scheduler.
//! Microtasks are a plain FIFO. Timers live in a min-heap ordered by
//! `(due_ms, enqueue_order)`, so timers due at the same virtual time fire in
//! the order they were scheduled. Cancellation removes the timer from the live
//! set and leaves its heap key behind to be skipped lazily.

use crate::scheduler::VirtualScheduler;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};
use std::fmt;

/// Identifier returned when a timer is scheduled; used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u64);

impl TimerId {
    /// Returns the raw id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// The kind of queued work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Runs before any timer, strictly FIFO
    Microtask,
    /// Bound to a virtual due time
    Timer,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Microtask => f.write_str("microtasks"),
            TaskKind::Timer => f.write_str("timer turns"),
        }
    }
}

type MicrotaskFn = Box<dyn FnOnce(&VirtualScheduler) + Send>;

/// A microtask to be executed by the scheduler.
///
/// Microtasks model promise continuations: they have no time association and
/// run in insertion order, including ones queued by other microtasks.
pub struct MicroTask {
    enqueue_order: u64,
    callback: MicrotaskFn,
}

impl MicroTask {
    pub(crate) fn new<F>(enqueue_order: u64, f: F) -> Self
    where
        F: FnOnce(&VirtualScheduler) + Send + 'static,
    {
        Self {
            enqueue_order,
            callback: Box::new(f),
        }
    }

    /// Global enqueue sequence number.
    pub fn enqueue_order(&self) -> u64 {
        self.enqueue_order
    }

    /// Executes the microtask.
    pub fn run(self, scheduler: &VirtualScheduler) {
        (self.callback)(scheduler)
    }
}

impl fmt::Debug for MicroTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MicroTask {{ enqueue_order: {}, .. }}", self.enqueue_order)
    }
}

/// Callback carried by a timer.
pub(crate) enum TimerCallback {
    /// Fires once and is dropped
    Once(MicrotaskFn),
    /// Re-armed `period_ms` after each firing until cancelled
    Repeating {
        period_ms: u64,
        callback: Box<dyn FnMut(&VirtualScheduler) + Send>,
    },
}

/// A timer popped from the queue, ready to run.
pub struct TimerTask {
    id: TimerId,
    due_ms: u64,
    enqueue_order: u64,
    pub(crate) callback: TimerCallback,
}

impl TimerTask {
    /// Timer id.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Virtual time the timer was due.
    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }

    /// Global enqueue sequence number.
    pub fn enqueue_order(&self) -> u64 {
        self.enqueue_order
    }
}

impl fmt::Debug for TimerTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TimerTask {{ id: {}, due_ms: {}, enqueue_order: {}, .. }}",
            self.id, self.due_ms, self.enqueue_order
        )
    }
}

/// A queue for microtasks.
///
/// Microtasks are drained completely before any timer runs.
#[derive(Debug, Default)]
pub struct MicrotaskQueue {
    queue: VecDeque<MicroTask>,
}

impl MicrotaskQueue {
    /// Creates a new empty MicrotaskQueue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Adds a microtask to the end of the queue.
    pub fn enqueue(&mut self, microtask: MicroTask) {
        self.queue.push_back(microtask);
    }

    /// Removes and returns the next microtask from the queue.
    pub fn dequeue(&mut self) -> Option<MicroTask> {
        self.queue.pop_front()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of microtasks in the queue.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TimerKey {
    due_ms: u64,
    enqueue_order: u64,
    id: TimerId,
}

struct LiveTimer {
    due_ms: u64,
    enqueue_order: u64,
    callback: TimerCallback,
}

/// A time-ordered queue for timers.
#[derive(Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<TimerKey>>,
    live: HashMap<TimerId, LiveTimer>,
}

impl TimerQueue {
    /// Creates a new empty TimerQueue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
        }
    }

    pub(crate) fn insert(
        &mut self,
        id: TimerId,
        due_ms: u64,
        enqueue_order: u64,
        callback: TimerCallback,
    ) {
        self.heap.push(Reverse(TimerKey {
            due_ms,
            enqueue_order,
            id,
        }));
        self.live.insert(
            id,
            LiveTimer {
                due_ms,
                enqueue_order,
                callback,
            },
        );
    }

    /// Withdraws a timer that has not fired yet. Returns false if it already
    /// fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id).is_some()
    }

    /// Due time of the earliest live timer.
    pub fn next_due(&mut self) -> Option<u64> {
        self.discard_stale();
        self.heap.peek().map(|Reverse(key)| key.due_ms)
    }

    /// Due time and enqueue order of the earliest live timer.
    pub fn peek_next(&mut self) -> Option<(u64, u64)> {
        self.discard_stale();
        self.heap
            .peek()
            .map(|Reverse(key)| (key.due_ms, key.enqueue_order))
    }

    /// Removes and returns the earliest live timer if it is due at or before
    /// `limit_ms`.
    pub fn pop_due(&mut self, limit_ms: u64) -> Option<TimerTask> {
        self.discard_stale();
        let Reverse(key) = *self.heap.peek()?;
        if key.due_ms > limit_ms {
            return None;
        }
        self.heap.pop();
        let timer = self.live.remove(&key.id)?;
        Some(TimerTask {
            id: key.id,
            due_ms: timer.due_ms,
            enqueue_order: timer.enqueue_order,
            callback: timer.callback,
        })
    }

    /// Returns true if no live timers remain.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Returns the number of live timers.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    // Heap keys whose timer was cancelled (or re-armed under a new order).
    fn discard_stale(&mut self) {
        while let Some(&Reverse(key)) = self.heap.peek() {
            match self.live.get(&key.id) {
                Some(timer)
                    if timer.due_ms == key.due_ms && timer.enqueue_order == key.enqueue_order =>
                {
                    return
                }
                _ => {
                    self.heap.pop();
                }
            }
        }
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("live", &self.live.len())
            .field("heap", &self.heap.len())
            .finish()
    }
}
