//! Async timing integration tests
//!
//! Microtask, timer and delayed-emission ordering under virtual time.

use async_runtime::{Promise, VirtualScheduler};
use integration_tests::init_test_logging;
use parking_lot::Mutex;
use std::sync::Arc;

fn scheduler() -> VirtualScheduler {
    init_test_logging();
    VirtualScheduler::new()
}

#[test]
fn run_all_fires_every_pending_timer() {
    let sched = scheduler();
    let flag = Arc::new(Mutex::new(false));

    sched.schedule_timer(|_| {}, 0);
    let f = flag.clone();
    sched.schedule_timer(move |_| *f.lock() = true, 1000);

    let elapsed = sched.run_all().unwrap();
    assert!(*flag.lock());
    assert_eq!(elapsed, 1000);
    assert!(!sched.has_pending_work());
}

#[test]
fn chained_promises_settle_on_microtask_drain() {
    let sched = scheduler();
    let log = Arc::new(Mutex::new(vec![]));

    let l1 = log.clone();
    let l2 = log.clone();
    let s = sched.clone();
    Promise::<(), String>::resolved(&sched, ())
        .and_then(move |_| {
            l1.lock().push("promise 1");
            Promise::resolved(&s, ())
        })
        .then(move |_| l2.lock().push("promise 2"));

    assert!(log.lock().is_empty());
    sched.drain_microtasks().unwrap();
    assert_eq!(*log.lock(), vec!["promise 1", "promise 2"]);
}

#[test]
fn timer_queued_by_microtask_fires_after_full_delay() {
    let sched = scheduler();
    let counter = Arc::new(Mutex::new(0));

    let c = counter.clone();
    let s = sched.clone();
    Promise::<(), String>::resolved(&sched, ()).then(move |_| {
        *c.lock() += 10;
        s.schedule_timer(move |_| *c.lock() += 1, 1000);
    });

    assert_eq!(*counter.lock(), 0);
    sched.drain_microtasks().unwrap();
    assert_eq!(*counter.lock(), 10);
    sched.advance(500).unwrap();
    assert_eq!(*counter.lock(), 10);
    sched.advance(500).unwrap();
    assert_eq!(*counter.lock(), 11);
}

#[test]
fn delayed_emission_arrives_after_virtual_delay() {
    let sched = scheduler();
    let seen = Arc::new(Mutex::new(None));

    let s = seen.clone();
    Promise::<bool, String>::resolved(&sched, false)
        .delay(1000)
        .subscribe(move |v| *s.lock() = Some(v), |_| {});

    sched.advance(999).unwrap();
    assert!(seen.lock().is_none());
    sched.advance(1).unwrap();
    assert_eq!(*seen.lock(), Some(false));
}

#[test]
fn microtask_from_timer_runs_before_next_timer() {
    let sched = scheduler();
    let order = Arc::new(Mutex::new(vec![]));

    let o = order.clone();
    sched.schedule_timer(
        move |s| {
            o.lock().push("timer a");
            let o = o.clone();
            s.schedule_microtask(move |_| o.lock().push("microtask"));
        },
        100,
    );
    let o = order.clone();
    sched.schedule_timer(move |_| o.lock().push("timer b"), 100);

    assert_eq!(sched.advance(100).unwrap(), 2);
    assert_eq!(*order.lock(), vec!["timer a", "microtask", "timer b"]);
}
