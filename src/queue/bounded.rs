//! Bounded Blocking Queue for monideque
//!
//! A monitor around a [`Deque`]: one mutex guards the deque and two condition
//! variables announce "space available" and "data available". Producers block
//! while the queue is full, consumers block while the data they need is not
//! there yet. Both ends are usable by both sides.

use std::time::{Duration, Instant};

use core::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};

use crate::config::{QueueConfig, WakePolicy};
use crate::deque::{Deque, End};
use crate::metrics::{AtomicMetrics, MetricsCollector, PerformanceMetrics};
use crate::sync::{Condvar, Mutex, MutexGuard};
use crate::{Error, Identity, Result};

const TARGET: &str = "monideque::queue";

// Upper bound on slots reserved up front; larger queues grow on demand
const PREALLOCATE_LIMIT: usize = 1024;

struct State<T> {
    deque: Deque<T>,
    // Callers parked in `ith`; their guards differ from plain consumers'
    index_waiters: usize,
}

type Guard<'a, T> = MutexGuard<'a, State<T>>;

/// How many waiters on one condition a finished operation wakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Wake {
    Nobody,
    One,
    All,
}

impl Wake {
    /// Wake for `data_available` once data has arrived, or once a caller has
    /// to hand on a data notification it could not use.
    ///
    /// A parked indexed lookup may need more values than are present, so a
    /// single wakeup could land on it and go nowhere; with any such waiter
    /// parked everybody is woken.
    pub(super) fn for_data(index_waiters: usize) -> Self {
        if index_waiters > 0 {
            Wake::All
        } else {
            Wake::One
        }
    }

    fn notify(self, condition: &Condvar) {
        match self {
            Wake::Nobody => {}
            Wake::One => condition.notify_one(),
            Wake::All => condition.notify_all(),
        }
    }
}

/// Wake owed to other consumers by a caller that consumed a data
/// notification and left the deque as it found it.
///
/// `waited` says whether the caller parked at all, `remaining` is the length
/// it leaves behind and `index_waiters` counts lookups still parked.
pub(super) fn hand_on(waited: bool, remaining: usize, index_waiters: usize) -> Wake {
    if waited && remaining > 0 {
        Wake::for_data(index_waiters)
    } else {
        Wake::Nobody
    }
}

/// A bounded, blocking, double-ended queue shared between threads.
///
/// Every operation takes `&self`; share the queue through an
/// [`Arc`](std::sync::Arc). Inserts block while the queue holds `capacity`
/// values; removals and lookups block until the values they need are present.
/// A capacity of 0 means unbounded.
///
/// There are no try or timeout variants: a blocked caller stays blocked until
/// another thread makes progress possible.
///
/// # Examples
///
/// ```rust
/// use monideque::deque::End;
/// use monideque::queue::BoundedQueue;
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue = Arc::new(BoundedQueue::new(1));
///
/// let producer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || {
///         queue.put(End::Tail, "x");
///         queue.put(End::Tail, "y"); // blocks until the consumer makes room
///     })
/// };
///
/// assert_eq!(queue.get(End::Head), "x");
/// producer.join().unwrap();
/// assert_eq!(queue.get(End::Head), "y");
/// ```
pub struct BoundedQueue<T> {
    state: Mutex<State<T>>,
    space_available: Condvar,
    data_available: Condvar,
    capacity: usize,
    wake_policy: WakePolicy,
    metrics: AtomicMetrics,
    metrics_enabled: AtomicBool,
}

impl<T> BoundedQueue<T> {
    /// Creates an empty queue holding at most `capacity` values.
    ///
    /// A capacity of 0 makes the queue unbounded.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(QueueConfig::default().with_capacity(capacity))
    }

    /// Creates an empty queue from `config`.
    pub fn with_config(config: QueueConfig) -> Self {
        debug!(
            target: TARGET,
            capacity = config.capacity,
            wake_policy = ?config.wake_policy,
            "creating bounded queue"
        );

        Self {
            state: Mutex::new(State {
                deque: Deque::with_capacity(config.capacity.min(PREALLOCATE_LIMIT)),
                index_waiters: 0,
            }),
            space_available: Condvar::new(),
            data_available: Condvar::new(),
            capacity: config.capacity,
            wake_policy: config.wake_policy,
            metrics: AtomicMetrics::default(),
            metrics_enabled: AtomicBool::new(config.metrics),
        }
    }

    /// Maximum number of values; 0 means unbounded.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The wake discipline this queue was built with.
    #[inline]
    pub fn wake_policy(&self) -> WakePolicy {
        self.wake_policy
    }

    /// Current number of values.
    pub fn len(&self) -> usize {
        self.lock().deque.len()
    }

    /// Returns `true` if the queue holds no values.
    pub fn is_empty(&self) -> bool {
        self.lock().deque.is_empty()
    }

    /// Returns `true` if an insert would block right now.
    pub fn is_full(&self) -> bool {
        self.full(&self.lock())
    }

    /// Inserts `value` at `end`, blocking while the queue is full.
    pub fn put(&self, end: End, value: T) {
        let started = self.stopwatch();
        let guard = self.lock();
        let mut guard = self.wait_while(guard, &self.space_available, "space", |state| {
            self.full(state)
        });

        guard.deque.put(end, value);
        let len = guard.deque.len();

        let wake = match self.wake_policy {
            WakePolicy::Precise => Wake::for_data(guard.index_waiters),
            WakePolicy::Compatible => Wake::One,
        };
        wake.notify(&self.data_available);
        drop(guard);

        self.record(started, |metrics, elapsed| {
            metrics.observe_len(len);
            metrics.record_success(elapsed);
        });
    }

    /// Removes and returns the value at `end`, blocking while the queue is
    /// empty.
    pub fn get(&self, end: End) -> T {
        let started = self.stopwatch();
        let guard = self.lock();
        let mut guard = self.wait_while(guard, &self.data_available, "data", |state| {
            state.deque.is_empty()
        });

        let value = match guard.deque.get(end) {
            Ok(value) => value,
            Err(_) => unreachable!("woke with an empty deque"),
        };
        self.space_available.notify_one();
        drop(guard);

        self.record(started, AtomicMetrics::record_success);
        value
    }

    /// Returns a copy of the value `index` steps in from `end`, blocking until
    /// the queue holds more than `index` values.
    ///
    /// Nothing is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexBeyondCapacity`] without blocking when the queue
    /// is bounded and `index >= capacity`, since no amount of waiting could
    /// satisfy the request.
    pub fn ith(&self, end: End, index: usize) -> Result<T>
    where
        T: Clone,
    {
        if self.capacity > 0 && index >= self.capacity {
            debug!(target: TARGET, %end, index, capacity = self.capacity, "index beyond capacity");
            return Err(Error::IndexBeyondCapacity {
                index,
                capacity: self.capacity,
            });
        }

        let started = self.stopwatch();
        let mut guard = self.lock();
        let waited = guard.deque.len() <= index;
        if waited {
            guard.index_waiters += 1;
            guard = self.wait_while(guard, &self.data_available, "index", |state| {
                state.deque.len() <= index
            });
            guard.index_waiters -= 1;
        }

        let value = guard.deque.ith(end, index).cloned()?;
        match self.wake_policy {
            WakePolicy::Compatible => self.space_available.notify_one(),
            WakePolicy::Precise => {
                hand_on(waited, guard.deque.len(), guard.index_waiters)
                    .notify(&self.data_available)
            }
        }
        drop(guard);

        self.record(started, AtomicMetrics::record_success);
        Ok(value)
    }

    /// Removes the first value identical to `value`, scanning from `end`.
    ///
    /// Blocks while the queue is empty. Returns `None` if the queue has values
    /// but none of them is `value`.
    pub fn remove_by_value(&self, end: End, value: &T) -> Option<T>
    where
        T: Identity,
    {
        let started = self.stopwatch();
        let guard = self.lock();
        let mut waited = false;
        let mut guard = self.wait_while(guard, &self.data_available, "data", |state| {
            let empty = state.deque.is_empty();
            waited |= empty;
            empty
        });

        let removed = guard.deque.remove_by_value(end, value);
        match self.wake_policy {
            WakePolicy::Compatible => self.space_available.notify_one(),
            WakePolicy::Precise if removed.is_some() => self.space_available.notify_one(),
            WakePolicy::Precise => {
                hand_on(waited, guard.deque.len(), guard.index_waiters)
                    .notify(&self.data_available)
            }
        }
        drop(guard);

        if removed.is_some() {
            self.record(started, AtomicMetrics::record_success);
        } else {
            self.record(started, AtomicMetrics::record_failure);
        }
        removed
    }

    /// Calls `f` on every value from head to tail while holding the lock.
    ///
    /// Never blocks on either condition. `f` must not call back into this
    /// queue.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&T),
    {
        self.lock().deque.for_each(f);
    }

    /// Renders the current contents head to tail, space separated.
    pub fn render(&self) -> String
    where
        T: AsRef<str>,
    {
        self.lock().deque.render()
    }

    /// Renders the current contents with `fmt`, head to tail, space separated.
    pub fn render_with<F, S>(&self, fmt: F) -> String
    where
        F: FnMut(&T) -> S,
        S: AsRef<str>,
    {
        self.lock().deque.render_with(fmt)
    }

    /// Inserts `value` at the head.
    #[inline]
    pub fn head_put(&self, value: T) {
        self.put(End::Head, value)
    }

    /// Removes the head value.
    #[inline]
    pub fn head_get(&self) -> T {
        self.get(End::Head)
    }

    /// Copy of the value `index` steps from the head.
    #[inline]
    pub fn head_ith(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.ith(End::Head, index)
    }

    /// Removes `value` scanning from the head.
    #[inline]
    pub fn head_rem(&self, value: &T) -> Option<T>
    where
        T: Identity,
    {
        self.remove_by_value(End::Head, value)
    }

    /// Inserts `value` at the tail.
    #[inline]
    pub fn tail_put(&self, value: T) {
        self.put(End::Tail, value)
    }

    /// Removes the tail value.
    #[inline]
    pub fn tail_get(&self) -> T {
        self.get(End::Tail)
    }

    /// Copy of the value `index` steps from the tail.
    #[inline]
    pub fn tail_ith(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.ith(End::Tail, index)
    }

    /// Removes `value` scanning from the tail.
    #[inline]
    pub fn tail_rem(&self, value: &T) -> Option<T>
    where
        T: Identity,
    {
        self.remove_by_value(End::Tail, value)
    }

    /// Unwraps the queue into its deque.
    ///
    /// Taking `self` by value guarantees no thread is still parked on the
    /// queue.
    pub fn into_inner(self) -> Deque<T> {
        match self.state.into_inner() {
            Ok(state) => state.deque,
            Err(poisoned) => {
                warn!(target: TARGET, "recovering deque from poisoned lock");
                poisoned.into_inner().deque
            }
        }
    }

    /// Tears the queue down, handing every remaining value to `cleanup` head
    /// to tail.
    ///
    /// Without a cleanup function the values are dropped. Spell the closure
    /// type of a bare `None` out (`None::<fn(T)>`), or call
    /// [`destroy_with`](Self::destroy_with) instead.
    pub fn destroy<F>(self, cleanup: Option<F>)
    where
        F: FnMut(T),
    {
        debug!(target: TARGET, capacity = self.capacity, "destroying bounded queue");
        self.into_inner().destroy(cleanup);
    }

    /// Tears the queue down, handing every remaining value to `cleanup` head
    /// to tail.
    #[inline]
    pub fn destroy_with<F>(self, cleanup: F)
    where
        F: FnMut(T),
    {
        self.destroy(Some(cleanup))
    }

    #[inline]
    fn full(&self, state: &State<T>) -> bool {
        self.capacity > 0 && state.deque.len() >= self.capacity
    }

    fn lock(&self) -> Guard<'_, T> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(target: TARGET, "recovering from poisoned lock");
                poisoned.into_inner()
            }
        }
    }

    /// Parks on `condition` until `blocked` turns false.
    ///
    /// The lock is released while parked and held again on return.
    fn wait_while<'a, F>(
        &self,
        mut guard: Guard<'a, T>,
        condition: &Condvar,
        waiting_for: &'static str,
        mut blocked: F,
    ) -> Guard<'a, T>
    where
        F: FnMut(&State<T>) -> bool,
    {
        if !blocked(&*guard) {
            return guard;
        }

        trace!(target: TARGET, waiting_for, len = guard.deque.len(), "parking");
        if self.metrics_on() {
            self.metrics.record_contention();
        }
        loop {
            guard = match condition.wait(guard) {
                Ok(guard) => guard,
                Err(poisoned) => {
                    warn!(target: TARGET, waiting_for, "recovering from poisoned lock");
                    poisoned.into_inner()
                }
            };
            if !blocked(&*guard) {
                break;
            }
        }
        trace!(target: TARGET, waiting_for, len = guard.deque.len(), "woke");
        guard
    }

    #[inline]
    fn metrics_on(&self) -> bool {
        cfg!(feature = "metrics") && self.metrics_enabled.load(Ordering::Relaxed)
    }

    /// Reads the clock only when the operation will be recorded.
    #[inline]
    fn stopwatch(&self) -> Option<Instant> {
        self.metrics_on().then(Instant::now)
    }

    #[inline]
    fn record<F>(&self, started: Option<Instant>, f: F)
    where
        F: FnOnce(&AtomicMetrics, Duration),
    {
        if let Some(started) = started {
            f(&self.metrics, started.elapsed());
        }
    }
}

impl<T> core::fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("capacity", &self.capacity)
            .field("wake_policy", &self.wake_policy)
            .finish_non_exhaustive()
    }
}

impl<T> MetricsCollector for BoundedQueue<T> {
    fn metrics(&self) -> PerformanceMetrics {
        self.metrics.snapshot()
    }

    fn reset_metrics(&self) {
        self.metrics.reset();
    }

    fn set_metrics_enabled(&self, enabled: bool) {
        self.metrics_enabled.store(enabled, Ordering::Relaxed);
    }

    fn is_metrics_enabled(&self) -> bool {
        self.metrics_enabled.load(Ordering::Relaxed)
    }
}
