//! Deterministic virtual-time scheduler.
//!
//! This module provides the single-threaded cooperative scheduler that drives
//! microtasks and timers under a virtual clock. Ordering rules:
//! 1. Microtasks run in FIFO order, including ones queued while draining
//! 2. Timers run in ascending due time, ties broken by scheduling order
//! 3. After every timer callback the microtask queue drains before the next
//!    timer is considered
//!
//! The scheduler is a cheap handle: clones share the same queues and clock.
//! Callbacks receive the handle so they can queue further work. No lock is
//! held while a callback runs.

use crate::clock::VirtualClock;
use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::task_queue::{
    MicroTask, MicrotaskQueue, TaskKind, TimerCallback, TimerId, TimerQueue, TimerTask,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Interval timers are clamped to this period so a zero period cannot spin
/// forever at a single instant.
const MIN_INTERVAL_MS: u64 = 1;

#[derive(Debug)]
struct SchedulerState {
    clock: VirtualClock,
    microtasks: MicrotaskQueue,
    timers: TimerQueue,
    next_enqueue_order: u64,
    next_timer_id: u64,
    /// Interval currently executing, and whether it was cancelled from
    /// inside its own callback.
    firing_interval: Option<(TimerId, bool)>,
    config: SchedulerConfig,
}

impl SchedulerState {
    fn next_order(&mut self) -> u64 {
        let order = self.next_enqueue_order;
        self.next_enqueue_order += 1;
        order
    }

    fn deadlock(&self, kind: TaskKind, limit: usize) -> SchedulerError {
        SchedulerError::Deadlock {
            kind,
            limit,
            pending_timers: self.timers.len(),
            pending_microtasks: self.microtasks.len(),
        }
    }
}

/// The virtual scheduler.
///
/// # Examples
///
/// ```
/// use async_runtime::VirtualScheduler;
/// use parking_lot::Mutex;
/// use std::sync::Arc;
///
/// let scheduler = VirtualScheduler::new();
/// let counter = Arc::new(Mutex::new(0));
///
/// let c = counter.clone();
/// scheduler.schedule_microtask(move |sched| {
///     *c.lock() += 10;
///     let c = c.clone();
///     sched.schedule_timer(move |_| *c.lock() += 1, 1000);
/// });
///
/// scheduler.drain_microtasks().unwrap();
/// assert_eq!(*counter.lock(), 10);
/// scheduler.advance(500).unwrap();
/// assert_eq!(*counter.lock(), 10);
/// scheduler.advance(500).unwrap();
/// assert_eq!(*counter.lock(), 11);
/// ```
#[derive(Clone)]
pub struct VirtualScheduler {
    state: Arc<Mutex<SchedulerState>>,
}

impl VirtualScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Creates a scheduler with `config`.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(SchedulerState {
                clock: VirtualClock::new(config.start_ms),
                microtasks: MicrotaskQueue::new(),
                timers: TimerQueue::new(),
                next_enqueue_order: 0,
                next_timer_id: 1,
                firing_interval: None,
                config,
            })),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> SchedulerConfig {
        self.state.lock().config.clone()
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.state.lock().clock.now_ms()
    }

    /// Number of live timers.
    pub fn pending_timers(&self) -> usize {
        self.state.lock().timers.len()
    }

    /// Number of queued microtasks.
    pub fn pending_microtasks(&self) -> usize {
        self.state.lock().microtasks.len()
    }

    /// Returns true if any timer or microtask is queued.
    pub fn has_pending_work(&self) -> bool {
        let state = self.state.lock();
        !state.timers.is_empty() || !state.microtasks.is_empty()
    }

    /// Appends `f` to the microtask queue.
    pub fn schedule_microtask<F>(&self, f: F)
    where
        F: FnOnce(&VirtualScheduler) + Send + 'static,
    {
        let mut state = self.state.lock();
        let order = state.next_order();
        state.microtasks.enqueue(MicroTask::new(order, f));
    }

    /// Schedules `f` to run once, `delay_ms` after the current virtual time.
    pub fn schedule_timer<F>(&self, f: F, delay_ms: u64) -> TimerId
    where
        F: FnOnce(&VirtualScheduler) + Send + 'static,
    {
        self.insert_timer(TimerCallback::Once(Box::new(f)), delay_ms)
    }

    /// Schedules `f` to run every `period_ms` until cancelled.
    pub fn schedule_interval<F>(&self, f: F, period_ms: u64) -> TimerId
    where
        F: FnMut(&VirtualScheduler) + Send + 'static,
    {
        let period_ms = period_ms.max(MIN_INTERVAL_MS);
        self.insert_timer(
            TimerCallback::Repeating {
                period_ms,
                callback: Box::new(f),
            },
            period_ms,
        )
    }

    /// Withdraws a timer before it fires. Returns false if the timer already
    /// fired or was cancelled earlier.
    pub fn cancel_timer(&self, id: TimerId) -> bool {
        let mut state = self.state.lock();
        if let Some((firing, cancelled)) = state.firing_interval.as_mut() {
            if *firing == id && !*cancelled {
                *cancelled = true;
                return true;
            }
        }
        let removed = state.timers.cancel(id);
        if removed {
            trace!(timer = %id, "timer cancelled");
        }
        removed
    }

    /// Runs microtasks until the queue is empty, including ones queued by
    /// the microtasks themselves. Timers are not touched.
    ///
    /// Returns the number of microtasks executed.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Deadlock`] if more than `max_microtasks`
    /// run in a single drain.
    pub fn drain_microtasks(&self) -> Result<usize, SchedulerError> {
        let mut executed = 0;
        loop {
            let microtask = {
                let mut state = self.state.lock();
                if state.microtasks.is_empty() {
                    break;
                }
                let limit = state.config.max_microtasks;
                if executed >= limit {
                    let err = state.deadlock(TaskKind::Microtask, limit);
                    warn!(%err, "microtask drain aborted");
                    return Err(err);
                }
                state.microtasks.dequeue()
            };
            if let Some(microtask) = microtask {
                trace!(order = microtask.enqueue_order(), "running microtask");
                microtask.run(self);
                executed += 1;
            }
        }
        Ok(executed)
    }

    /// Moves virtual time forward by `ms`, firing every timer that falls due
    /// along the way.
    ///
    /// Pending microtasks drain first. Each timer sees the clock at its own
    /// due time, and microtasks it queues drain before the next timer. The
    /// clock ends exactly `ms` after where it started.
    ///
    /// Returns the number of timers fired.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Deadlock`] if a microtask drain exceeds its
    /// limit.
    pub fn advance(&self, ms: u64) -> Result<usize, SchedulerError> {
        self.drain_microtasks()?;
        let target = self.state.lock().clock.now_ms().saturating_add(ms);
        let mut fired = 0;
        while let Some(task) = self.pop_due_timer(target) {
            self.run_timer(task)?;
            fired += 1;
        }
        self.state.lock().clock.advance_to(target);
        debug!(ms, fired, now_ms = target, "advanced virtual time");
        Ok(fired)
    }

    /// Jumps from timer to timer until no timers or microtasks remain.
    ///
    /// Timers already queued when the call starts always run. Only timers
    /// scheduled or re-armed during the call count as turns.
    ///
    /// Returns the virtual time that elapsed.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Deadlock`] once `max_turns` such timers have
    /// run and another one is due, e.g. a live interval or two timers that
    /// keep re-arming each other.
    pub fn run_all(&self) -> Result<u64, SchedulerError> {
        let start = self.now_ms();
        let mut turns = 0;
        self.drain_microtasks()?;
        let watermark = self.state.lock().next_enqueue_order;
        loop {
            let task = {
                let mut state = self.state.lock();
                let Some((due, order)) = state.timers.peek_next() else {
                    break;
                };
                let limit = state.config.max_turns;
                if order >= watermark && turns >= limit {
                    let err = state.deadlock(TaskKind::Timer, limit);
                    warn!(%err, "run_all aborted");
                    return Err(err);
                }
                state.clock.advance_to(due);
                state.timers.pop_due(due)
            };
            if let Some(task) = task {
                let rescheduled = task.enqueue_order() >= watermark;
                self.run_timer(task)?;
                if rescheduled {
                    turns += 1;
                }
            }
        }
        let elapsed = self.now_ms() - start;
        debug!(turns, elapsed, "ran all pending work");
        Ok(elapsed)
    }

    fn insert_timer(&self, callback: TimerCallback, delay_ms: u64) -> TimerId {
        let mut state = self.state.lock();
        let id = TimerId(state.next_timer_id);
        state.next_timer_id += 1;
        let order = state.next_order();
        let due_ms = state.clock.now_ms().saturating_add(delay_ms);
        state.timers.insert(id, due_ms, order, callback);
        trace!(timer = %id, due_ms, "timer scheduled");
        id
    }

    fn pop_due_timer(&self, limit_ms: u64) -> Option<TimerTask> {
        let mut state = self.state.lock();
        let task = state.timers.pop_due(limit_ms)?;
        state.clock.advance_to(task.due_ms());
        Some(task)
    }

    fn run_timer(&self, task: TimerTask) -> Result<(), SchedulerError> {
        trace!(timer = %task.id(), due_ms = task.due_ms(), "running timer");
        let id = task.id();
        let due_ms = task.due_ms();
        match task.callback {
            TimerCallback::Once(callback) => callback(self),
            TimerCallback::Repeating {
                period_ms,
                mut callback,
            } => {
                self.state.lock().firing_interval = Some((id, false));
                callback(self);
                let mut state = self.state.lock();
                let cancelled = matches!(state.firing_interval.take(), Some((_, true)));
                if !cancelled {
                    let order = state.next_order();
                    state.timers.insert(
                        id,
                        due_ms.saturating_add(period_ms),
                        order,
                        TimerCallback::Repeating {
                            period_ms,
                            callback,
                        },
                    );
                }
            }
        }
        self.drain_microtasks()?;
        Ok(())
    }
}

impl Default for VirtualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("VirtualScheduler")
            .field("now_ms", &state.clock.now_ms())
            .field("timers", &state.timers.len())
            .field("microtasks", &state.microtasks.len())
            .finish()
    }
}
