//! Scheduler error types.

use crate::task_queue::TaskKind;
use thiserror::Error;

/// Errors raised while driving the virtual scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// Queued work kept rescheduling itself past the configured limit.
    #[error(
        "scheduler did not quiesce after {limit} {kind} \
         ({pending_timers} timers and {pending_microtasks} microtasks still pending)"
    )]
    Deadlock {
        /// Which queue hit its limit
        kind: TaskKind,
        /// The configured limit that was reached
        limit: usize,
        /// Live timers at the time of failure
        pending_timers: usize,
        /// Queued microtasks at the time of failure
        pending_microtasks: usize,
    },
}
