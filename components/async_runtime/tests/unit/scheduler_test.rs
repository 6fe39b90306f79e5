//! Unit tests for VirtualScheduler

use super::init_test_logging;
use async_runtime::{SchedulerConfig, SchedulerError, TaskKind, VirtualScheduler};
use parking_lot::Mutex;
use std::sync::Arc;

type Log = Arc<Mutex<Vec<String>>>;

fn log() -> Log {
    Arc::new(Mutex::new(vec![]))
}

fn push(log: &Log, entry: &str) -> impl FnOnce(&VirtualScheduler) + Send + 'static {
    let log = log.clone();
    let entry = entry.to_string();
    move |_| log.lock().push(entry)
}

#[test]
fn new_scheduler_has_empty_queues() {
    let scheduler = VirtualScheduler::new();
    assert_eq!(scheduler.pending_timers(), 0);
    assert_eq!(scheduler.pending_microtasks(), 0);
}

#[test]
fn config_start_time_is_respected() {
    let scheduler = VirtualScheduler::with_config(SchedulerConfig {
        start_ms: 5_000,
        ..SchedulerConfig::default()
    });
    assert_eq!(scheduler.now_ms(), 5_000);
}

#[test]
fn timer_fires_exactly_once() {
    init_test_logging();
    let scheduler = VirtualScheduler::new();
    let count = Arc::new(Mutex::new(0));
    let c = count.clone();
    scheduler.schedule_timer(move |_| *c.lock() += 1, 1000);

    assert_eq!(scheduler.advance(1000).unwrap(), 1);
    assert_eq!(scheduler.advance(5000).unwrap(), 0);
    assert_eq!(*count.lock(), 1);
}

#[test]
fn two_half_advances_equal_one_full_advance() {
    let scheduler = VirtualScheduler::new();
    let entries = log();
    scheduler.schedule_timer(push(&entries, "t"), 1000);

    scheduler.advance(500).unwrap();
    assert!(entries.lock().is_empty());
    scheduler.advance(500).unwrap();
    assert_eq!(*entries.lock(), vec!["t"]);
    assert_eq!(scheduler.now_ms(), 1000);
}

#[test]
fn equal_due_timers_fire_in_scheduling_order() {
    let scheduler = VirtualScheduler::new();
    let entries = log();
    scheduler.schedule_timer(push(&entries, "b"), 100);
    scheduler.schedule_timer(push(&entries, "a"), 50);
    scheduler.schedule_timer(push(&entries, "c"), 100);

    scheduler.advance(100).unwrap();
    assert_eq!(*entries.lock(), vec!["a", "b", "c"]);
}

#[test]
fn microtask_from_timer_runs_before_equal_due_timer() {
    let scheduler = VirtualScheduler::new();
    let entries = log();

    let l = entries.clone();
    scheduler.schedule_timer(
        move |s| {
            l.lock().push("timer-1".to_string());
            let l2 = l.clone();
            s.schedule_microtask(move |_| l2.lock().push("micro-from-timer-1".to_string()));
        },
        10,
    );
    scheduler.schedule_timer(push(&entries, "timer-2"), 10);

    scheduler.advance(10).unwrap();
    assert_eq!(
        *entries.lock(),
        vec!["timer-1", "micro-from-timer-1", "timer-2"]
    );
}

#[test]
fn pending_microtasks_drain_before_advance_fires_timers() {
    let scheduler = VirtualScheduler::new();
    let entries = log();
    scheduler.schedule_timer(push(&entries, "timer"), 0);
    scheduler.schedule_microtask(push(&entries, "micro"));

    scheduler.advance(0).unwrap();
    assert_eq!(*entries.lock(), vec!["micro", "timer"]);
}

#[test]
fn nested_timer_is_relative_to_parent_due_time() {
    let scheduler = VirtualScheduler::new();
    let fired_at = Arc::new(Mutex::new(vec![]));

    let f = fired_at.clone();
    scheduler.schedule_timer(
        move |s| {
            f.lock().push(s.now_ms());
            let f2 = f.clone();
            s.schedule_timer(move |s| f2.lock().push(s.now_ms()), 300);
        },
        200,
    );

    scheduler.advance(1000).unwrap();
    assert_eq!(*fired_at.lock(), vec![200, 500]);
}

#[test]
fn cancelled_timer_never_fires() {
    let scheduler = VirtualScheduler::new();
    let entries = log();
    let id = scheduler.schedule_timer(push(&entries, "cancelled"), 100);
    scheduler.schedule_timer(push(&entries, "kept"), 200);

    assert!(scheduler.cancel_timer(id));
    scheduler.run_all().unwrap();
    assert_eq!(*entries.lock(), vec!["kept"]);
}

#[test]
fn cancelling_fired_timer_returns_false() {
    let scheduler = VirtualScheduler::new();
    let id = scheduler.schedule_timer(|_| {}, 10);
    scheduler.advance(10).unwrap();
    assert!(!scheduler.cancel_timer(id));
}

#[test]
fn run_all_jumps_to_last_timer() {
    let scheduler = VirtualScheduler::new();
    let entries = log();
    scheduler.schedule_timer(push(&entries, "zero"), 0);
    scheduler.schedule_timer(push(&entries, "second"), 1000);

    let elapsed = scheduler.run_all().unwrap();
    assert_eq!(elapsed, 1000);
    assert_eq!(*entries.lock(), vec!["zero", "second"]);
    assert!(!scheduler.has_pending_work());
}

#[test]
fn run_all_on_empty_scheduler_is_noop() {
    let scheduler = VirtualScheduler::new();
    assert_eq!(scheduler.run_all().unwrap(), 0);
}

#[test]
fn interval_fires_once_per_period() {
    let scheduler = VirtualScheduler::new();
    let count = Arc::new(Mutex::new(0));
    let c = count.clone();
    let id = scheduler.schedule_interval(move |_| *c.lock() += 1, 250);

    scheduler.advance(1000).unwrap();
    assert_eq!(*count.lock(), 4);
    assert!(scheduler.cancel_timer(id));
    scheduler.advance(1000).unwrap();
    assert_eq!(*count.lock(), 4);
}

#[test]
fn run_all_with_live_interval_deadlocks() {
    init_test_logging();
    let scheduler = VirtualScheduler::new();
    scheduler.schedule_interval(|_| {}, 10);

    let err = scheduler.run_all().unwrap_err();
    assert_eq!(
        err,
        SchedulerError::Deadlock {
            kind: TaskKind::Timer,
            limit: 20,
            pending_timers: 1,
            pending_microtasks: 0,
        }
    );
}

#[test]
fn mutually_rescheduling_timers_deadlock_at_configured_limit() {
    let scheduler = VirtualScheduler::with_config(SchedulerConfig::default().with_max_turns(5));

    fn ping(s: &VirtualScheduler) {
        s.schedule_timer(pong, 1);
    }
    fn pong(s: &VirtualScheduler) {
        s.schedule_timer(ping, 1);
    }
    scheduler.schedule_timer(ping, 1);

    let err = scheduler.run_all().unwrap_err();
    assert!(matches!(err, SchedulerError::Deadlock { limit: 5, .. }));
    // The first ping was queued before run_all; the five re-armed timers
    // after it are the counted turns.
    assert_eq!(scheduler.now_ms(), 6);
}

#[test]
fn run_all_drains_backlog_longer_than_turn_limit() {
    init_test_logging();
    let scheduler = VirtualScheduler::new();
    let fired = Arc::new(Mutex::new(0));

    for i in 0..25 {
        let f = fired.clone();
        scheduler.schedule_timer(move |_| *f.lock() += 1, i * 10);
    }

    assert_eq!(scheduler.run_all().unwrap(), 240);
    assert_eq!(*fired.lock(), 25);
    assert!(!scheduler.has_pending_work());
}

#[test]
fn run_all_allows_bounded_rescheduling_within_limit() {
    let scheduler = VirtualScheduler::new();
    let fired = Arc::new(Mutex::new(0));

    fn chain(s: &VirtualScheduler, fired: Arc<Mutex<u32>>, left: u32) {
        *fired.lock() += 1;
        if left > 0 {
            s.schedule_timer(move |s| chain(s, fired, left - 1), 5);
        }
    }
    for _ in 0..30 {
        let f = fired.clone();
        scheduler.schedule_timer(move |_| *f.lock() += 1, 0);
    }
    let f = fired.clone();
    scheduler.schedule_timer(move |s| chain(s, f, 20), 1);

    scheduler.run_all().unwrap();
    assert_eq!(*fired.lock(), 30 + 21);
}
