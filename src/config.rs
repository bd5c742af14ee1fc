//! Queue configuration

/// Which waiters an operation wakes after it finishes.
///
/// Both policies use the same two conditions: one that announces freed
/// capacity and one that announces new data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WakePolicy {
    /// Wake only on real state changes and never drop a wakeup.
    ///
    /// Lookups and removals that find nothing do not wake producers. A
    /// consumer that took a data notification without removing anything
    /// hands it on to the next waiting consumer. Inserts wake every
    /// consumer while an indexed lookup is parked, since those waiters need
    /// different lengths.
    #[default]
    Precise,
    /// Signal exactly like the classic two-condition monitor.
    ///
    /// Every insert wakes one consumer and every lookup or removal wakes one
    /// producer, including lookups and removals that freed no capacity.
    Compatible,
}

/// Settings for a [`BoundedQueue`](crate::queue::BoundedQueue).
///
/// # Examples
///
/// ```rust
/// use monideque::config::{QueueConfig, WakePolicy};
/// use monideque::queue::BoundedQueue;
///
/// let config = QueueConfig::default()
///     .with_capacity(4)
///     .with_wake_policy(WakePolicy::Compatible);
/// let queue: BoundedQueue<u32> = BoundedQueue::with_config(config);
/// assert_eq!(queue.capacity(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QueueConfig {
    /// Maximum number of values; 0 means unbounded.
    pub capacity: usize,
    /// Wake discipline.
    pub wake_policy: WakePolicy,
    /// Whether operation metrics start enabled.
    pub metrics: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            wake_policy: WakePolicy::default(),
            metrics: true,
        }
    }
}

impl QueueConfig {
    /// Sets the capacity bound; 0 means unbounded.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the wake policy.
    #[must_use]
    pub const fn with_wake_policy(mut self, wake_policy: WakePolicy) -> Self {
        self.wake_policy = wake_policy;
        self
    }

    /// Enables or disables metrics collection.
    #[must_use]
    pub const fn with_metrics(mut self, metrics: bool) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns `true` if the configuration imposes no capacity bound.
    #[inline]
    pub const fn is_unbounded(&self) -> bool {
        self.capacity == 0
    }
}
