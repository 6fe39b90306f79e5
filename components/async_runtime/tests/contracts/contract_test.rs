//! Contract tests for async_runtime component
//!
//! These tests pin the public surface the HTTP client and course client
//! build on.

use async_runtime::{
    Promise, PromiseState, SchedulerConfig, SchedulerError, TimerId, VirtualScheduler,
};

mod scheduler_contract {
    use super::*;

    #[test]
    fn schedule_timer_returns_timer_id() {
        let scheduler = VirtualScheduler::new();
        let id: TimerId = scheduler.schedule_timer(|_| {}, 10);
        let other: TimerId = scheduler.schedule_timer(|_| {}, 10);
        assert_ne!(id, other);
    }

    #[test]
    fn drain_microtasks_returns_executed_count() {
        let scheduler = VirtualScheduler::new();
        scheduler.schedule_microtask(|_| {});
        let result: Result<usize, SchedulerError> = scheduler.drain_microtasks();
        assert_eq!(result, Ok(1));
    }

    #[test]
    fn advance_returns_fired_count() {
        let scheduler = VirtualScheduler::new();
        scheduler.schedule_timer(|_| {}, 10);
        let result: Result<usize, SchedulerError> = scheduler.advance(10);
        assert_eq!(result, Ok(1));
    }

    #[test]
    fn run_all_returns_elapsed_ms() {
        let scheduler = VirtualScheduler::new();
        scheduler.schedule_timer(|_| {}, 30);
        let result: Result<u64, SchedulerError> = scheduler.run_all();
        assert_eq!(result, Ok(30));
    }

    #[test]
    fn clones_share_queues() {
        let scheduler = VirtualScheduler::new();
        let handle = scheduler.clone();
        handle.schedule_timer(|_| {}, 10);
        assert_eq!(scheduler.pending_timers(), 1);
    }

    #[test]
    fn default_config_limits() {
        let config = SchedulerConfig::default();
        assert_eq!(config.max_turns, 20);
        assert_eq!(config.max_microtasks, 10_000);
        assert_eq!(VirtualScheduler::new().config(), config);
    }
}

mod promise_contract {
    use super::*;

    #[test]
    fn promise_state_variants() {
        let scheduler = VirtualScheduler::new();
        let fulfilled: Promise<(), ()> = Promise::resolved(&scheduler, ());
        let rejected: Promise<(), ()> = Promise::rejected(&scheduler, ());
        let pending: Promise<(), ()> = Promise::pending(&scheduler);

        assert_eq!(fulfilled.state(), PromiseState::Fulfilled);
        assert_eq!(rejected.state(), PromiseState::Rejected);
        assert_eq!(pending.state(), PromiseState::Pending);
    }

    #[test]
    fn clones_observe_same_settlement() {
        let scheduler = VirtualScheduler::new();
        let promise: Promise<i32, ()> = Promise::pending(&scheduler);
        let clone = promise.clone();
        promise.resolve(3);
        assert_eq!(clone.result(), Some(Ok(3)));
    }
}
