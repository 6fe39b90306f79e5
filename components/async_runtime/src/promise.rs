//! Scheduler-bound promises.
//!
//! This module provides the one-shot result handle used for asynchronous
//! responses. A promise settles at most once. Continuations registered on it
//! never run synchronously: settling (or registering on an already settled
//! promise) queues each continuation as a microtask on the owning
//! [`VirtualScheduler`].

use crate::scheduler::VirtualScheduler;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// The state of a Promise.
///
/// Once settled (Fulfilled or Rejected), a Promise cannot change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromiseState {
    /// The initial state; the promise is neither fulfilled nor rejected.
    Pending,
    /// The promise has been resolved with a value.
    Fulfilled,
    /// The promise has been rejected with an error.
    Rejected,
}

type Reaction<T, E> = Box<dyn FnOnce(Result<T, E>) + Send>;

struct Shared<T, E> {
    outcome: Option<Result<T, E>>,
    reactions: Vec<Reaction<T, E>>,
}

/// A value or error that becomes available later.
///
/// Clones refer to the same underlying promise.
///
/// # Examples
///
/// ```
/// use async_runtime::{Promise, PromiseState, VirtualScheduler};
///
/// let scheduler = VirtualScheduler::new();
/// let promise: Promise<i32, String> = Promise::pending(&scheduler);
/// let doubled = promise.then(|v| v * 2);
///
/// promise.resolve(21);
/// assert_eq!(doubled.state(), PromiseState::Pending);
///
/// scheduler.drain_microtasks().unwrap();
/// assert_eq!(doubled.result(), Some(Ok(42)));
/// ```
pub struct Promise<T, E> {
    shared: Arc<Mutex<Shared<T, E>>>,
    scheduler: VirtualScheduler,
}

impl<T, E> Clone for Promise<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<T, E> Promise<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Creates an unsettled promise.
    pub fn pending(scheduler: &VirtualScheduler) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                outcome: None,
                reactions: Vec::new(),
            })),
            scheduler: scheduler.clone(),
        }
    }

    /// Creates a promise already fulfilled with `value`.
    pub fn resolved(scheduler: &VirtualScheduler, value: T) -> Self {
        let promise = Self::pending(scheduler);
        promise.resolve(value);
        promise
    }

    /// Creates a promise already rejected with `error`.
    pub fn rejected(scheduler: &VirtualScheduler, error: E) -> Self {
        let promise = Self::pending(scheduler);
        promise.reject(error);
        promise
    }

    /// The scheduler continuations run on.
    pub fn scheduler(&self) -> &VirtualScheduler {
        &self.scheduler
    }

    /// Current state.
    pub fn state(&self) -> PromiseState {
        match &self.shared.lock().outcome {
            None => PromiseState::Pending,
            Some(Ok(_)) => PromiseState::Fulfilled,
            Some(Err(_)) => PromiseState::Rejected,
        }
    }

    /// Returns true until the promise settles.
    pub fn is_pending(&self) -> bool {
        self.state() == PromiseState::Pending
    }

    /// A copy of the outcome, if settled.
    pub fn result(&self) -> Option<Result<T, E>> {
        self.shared.lock().outcome.clone()
    }

    /// Fulfils the promise. Returns false if it was already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Rejects the promise. Returns false if it was already settled.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Err(error))
    }

    /// Settles the promise with `outcome` and queues every registered
    /// continuation. Returns false if it was already settled.
    pub fn settle(&self, outcome: Result<T, E>) -> bool {
        let reactions = {
            let mut shared = self.shared.lock();
            if shared.outcome.is_some() {
                return false;
            }
            shared.outcome = Some(outcome.clone());
            std::mem::take(&mut shared.reactions)
        };
        for reaction in reactions {
            let outcome = outcome.clone();
            self.scheduler.schedule_microtask(move |_| reaction(outcome));
        }
        true
    }

    /// Registers `f` to receive the outcome as a microtask.
    pub fn on_settled<F>(&self, f: F)
    where
        F: FnOnce(Result<T, E>) + Send + 'static,
    {
        let mut shared = self.shared.lock();
        let settled = shared.outcome.clone();
        match settled {
            Some(outcome) => {
                drop(shared);
                self.scheduler.schedule_microtask(move |_| f(outcome));
            }
            None => shared.reactions.push(Box::new(f)),
        }
    }

    /// Registers separate success and failure continuations.
    pub fn subscribe<S, F>(&self, on_ok: S, on_err: F)
    where
        S: FnOnce(T) + Send + 'static,
        F: FnOnce(E) + Send + 'static,
    {
        self.on_settled(move |outcome| match outcome {
            Ok(value) => on_ok(value),
            Err(error) => on_err(error),
        });
    }

    /// Maps the fulfilled value; rejections pass through.
    pub fn then<U, F>(&self, f: F) -> Promise<U, E>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.map_result(move |outcome| outcome.map(f))
    }

    /// Chains a continuation that itself returns a promise. The returned
    /// promise settles with whatever that inner promise settles with.
    pub fn and_then<U, F>(&self, f: F) -> Promise<U, E>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> Promise<U, E> + Send + 'static,
    {
        let next = Promise::pending(&self.scheduler);
        let target = next.clone();
        self.on_settled(move |outcome| match outcome {
            Ok(value) => {
                let inner = f(value);
                inner.on_settled(move |inner_outcome| {
                    target.settle(inner_outcome);
                });
            }
            Err(error) => {
                target.reject(error);
            }
        });
        next
    }

    /// Maps the whole outcome, allowing success to become failure and back.
    pub fn map_result<U, F2, G>(&self, f: G) -> Promise<U, F2>
    where
        U: Clone + Send + 'static,
        F2: Clone + Send + 'static,
        G: FnOnce(Result<T, E>) -> Result<U, F2> + Send + 'static,
    {
        let next = Promise::pending(&self.scheduler);
        let target = next.clone();
        self.on_settled(move |outcome| {
            target.settle(f(outcome));
        });
        next
    }

    /// Maps the rejection; fulfilled values pass through.
    pub fn map_err<F2, G>(&self, f: G) -> Promise<T, F2>
    where
        F2: Clone + Send + 'static,
        G: FnOnce(E) -> F2 + Send + 'static,
    {
        self.map_result(move |outcome| outcome.map_err(f))
    }

    /// Re-emits the value `delay_ms` of virtual time after this promise
    /// fulfils. A rejection passes through without waiting.
    pub fn delay(&self, delay_ms: u64) -> Promise<T, E> {
        let next = Promise::pending(&self.scheduler);
        let target = next.clone();
        let scheduler = self.scheduler.clone();
        self.on_settled(move |outcome| match outcome {
            Ok(value) => {
                scheduler.schedule_timer(
                    move |_| {
                        target.resolve(value);
                    },
                    delay_ms,
                );
            }
            Err(error) => {
                target.reject(error);
            }
        });
        next
    }
}

impl<T, E> fmt::Debug for Promise<T, E>
where
    T: fmt::Debug,
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.lock();
        f.debug_struct("Promise")
            .field("outcome", &shared.outcome)
            .field("reactions", &shared.reactions.len())
            .finish()
    }
}
