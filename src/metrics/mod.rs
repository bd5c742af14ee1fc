//! Operation Metrics Module
//!
//! Counters describing how a [`BoundedQueue`](crate::queue::BoundedQueue) is
//! being used: how many operations completed, how many callers had to block,
//! how long operations took including time spent waiting, and how full the
//! queue got.
//!
//! With the `metrics` feature disabled every recorder is a no-op and
//! snapshots are all zeros.

use core::time::Duration;

#[cfg(feature = "metrics")]
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Point-in-time view of a queue's counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceMetrics {
    /// Total number of operations performed
    pub total_operations: u64,
    /// Number of operations that produced their intended effect
    pub successful_operations: u64,
    /// Number of operations that completed without effect (e.g. a removal
    /// that found nothing)
    pub failed_operations: u64,
    /// Number of operations that had to wait at least once
    pub contended_operations: u64,
    /// Average operation time in nanoseconds, waiting included
    pub avg_operation_time_ns: u64,
    /// Maximum operation time in nanoseconds, waiting included
    pub max_operation_time_ns: u64,
    /// Highest length observed
    pub peak_len: usize,
}

impl PerformanceMetrics {
    /// Calculate success rate as percentage
    pub fn success_rate(&self) -> f64 {
        percentage(self.successful_operations, self.total_operations)
    }

    /// Calculate contention rate as percentage
    pub fn contention_rate(&self) -> f64 {
        percentage(self.contended_operations, self.total_operations)
    }

    /// Calculate failure rate as percentage
    pub fn failure_rate(&self) -> f64 {
        percentage(self.failed_operations, self.total_operations)
    }

    /// Get average operation time as Duration
    pub fn avg_operation_time(&self) -> Duration {
        Duration::from_nanos(self.avg_operation_time_ns)
    }

    /// Get maximum operation time as Duration
    pub fn max_operation_time(&self) -> Duration {
        Duration::from_nanos(self.max_operation_time_ns)
    }
}

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Internal atomic metrics collection
#[cfg(feature = "metrics")]
#[derive(Debug, Default)]
pub struct AtomicMetrics {
    total_operations: AtomicU64,
    successful_operations: AtomicU64,
    failed_operations: AtomicU64,
    contended_operations: AtomicU64,
    total_time_ns: AtomicU64,
    max_time_ns: AtomicU64,
    peak_len: AtomicUsize,
}

#[cfg(feature = "metrics")]
impl AtomicMetrics {
    /// Record a successful operation with its duration
    pub fn record_success(&self, duration: Duration) {
        self.successful_operations.fetch_add(1, Ordering::Relaxed);
        self.record_time(duration);
    }

    /// Record an operation that completed without effect
    pub fn record_failure(&self, duration: Duration) {
        self.failed_operations.fetch_add(1, Ordering::Relaxed);
        self.record_time(duration);
    }

    /// Record an operation that had to wait
    pub fn record_contention(&self) {
        self.contended_operations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the length after an insert
    pub fn observe_len(&self, len: usize) {
        self.peak_len.fetch_max(len, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> PerformanceMetrics {
        let total_ops = self.total_operations.load(Ordering::Relaxed);
        let total_time = self.total_time_ns.load(Ordering::Relaxed);

        PerformanceMetrics {
            total_operations: total_ops,
            successful_operations: self.successful_operations.load(Ordering::Relaxed),
            failed_operations: self.failed_operations.load(Ordering::Relaxed),
            contended_operations: self.contended_operations.load(Ordering::Relaxed),
            avg_operation_time_ns: if total_ops > 0 { total_time / total_ops } else { 0 },
            max_operation_time_ns: self.max_time_ns.load(Ordering::Relaxed),
            peak_len: self.peak_len.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.total_operations.store(0, Ordering::Relaxed);
        self.successful_operations.store(0, Ordering::Relaxed);
        self.failed_operations.store(0, Ordering::Relaxed);
        self.contended_operations.store(0, Ordering::Relaxed);
        self.total_time_ns.store(0, Ordering::Relaxed);
        self.max_time_ns.store(0, Ordering::Relaxed);
        self.peak_len.store(0, Ordering::Relaxed);
    }

    fn record_time(&self, duration: Duration) {
        let duration_ns = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.total_operations.fetch_add(1, Ordering::Relaxed);
        self.total_time_ns.fetch_add(duration_ns, Ordering::Relaxed);
        self.max_time_ns.fetch_max(duration_ns, Ordering::Relaxed);
    }
}

/// Internal atomic metrics collection (disabled)
#[cfg(not(feature = "metrics"))]
#[derive(Debug, Default)]
pub struct AtomicMetrics;

#[cfg(not(feature = "metrics"))]
impl AtomicMetrics {
    /// Record a successful operation with its duration
    pub fn record_success(&self, _duration: Duration) {}
    /// Record an operation that completed without effect
    pub fn record_failure(&self, _duration: Duration) {}
    /// Record an operation that had to wait
    pub fn record_contention(&self) {}
    /// Record the length after an insert
    pub fn observe_len(&self, _len: usize) {}
    /// Get current metrics snapshot
    pub fn snapshot(&self) -> PerformanceMetrics {
        PerformanceMetrics::default()
    }
    /// Reset all counters
    pub fn reset(&self) {}
}

/// Trait for data structures that support performance metrics
pub trait MetricsCollector {
    /// Get current performance metrics
    fn metrics(&self) -> PerformanceMetrics;

    /// Reset all metrics
    fn reset_metrics(&self);

    /// Enable or disable metrics collection
    fn set_metrics_enabled(&self, enabled: bool);

    /// Check if metrics collection is enabled
    fn is_metrics_enabled(&self) -> bool;
}
