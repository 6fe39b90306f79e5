//! Deterministic async runtime with virtual time.
//!
//! This crate provides the scheduling primitives used to test asynchronous
//! code without wall-clock delays:
//! - Virtual scheduler with a microtask queue and a time-ordered timer queue
//! - Scheduler-bound promises whose continuations run as microtasks
//!
//! # Overview
//!
//! - [`VirtualScheduler`] - Drives microtasks and timers under a virtual clock
//! - [`Promise`] - One-shot result handle settled through the scheduler
//! - [`SchedulerConfig`] - Turn limits and starting time
//! - [`SchedulerError`] - Raised when queued work never quiesces
//!
//! # Examples
//!
//! ## Microtasks before timers
//!
//! ```
//! use async_runtime::VirtualScheduler;
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//!
//! let scheduler = VirtualScheduler::new();
//! let order = Arc::new(Mutex::new(vec![]));
//!
//! let o = order.clone();
//! scheduler.schedule_timer(move |_| o.lock().push("timer"), 0);
//! let o = order.clone();
//! scheduler.schedule_microtask(move |_| o.lock().push("microtask"));
//!
//! scheduler.run_all().unwrap();
//! assert_eq!(*order.lock(), vec!["microtask", "timer"]);
//! ```
//!
//! ## Promise Usage
//!
//! ```
//! use async_runtime::{Promise, PromiseState, VirtualScheduler};
//!
//! let scheduler = VirtualScheduler::new();
//! let promise: Promise<i32, String> = Promise::pending(&scheduler);
//! promise.resolve(42);
//! assert_eq!(promise.state(), PromiseState::Fulfilled);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod error;
pub mod promise;
pub mod scheduler;
pub mod task_queue;

// Re-export main types at crate root
pub use clock::VirtualClock;
pub use config::SchedulerConfig;
pub use error::SchedulerError;
pub use promise::{Promise, PromiseState};
pub use scheduler::VirtualScheduler;
pub use task_queue::{MicroTask, MicrotaskQueue, TaskKind, TimerId, TimerQueue, TimerTask};
