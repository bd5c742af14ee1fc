//! # monideque
//!
//! A bounded, blocking double-ended queue for handing units of work between
//! producer and consumer threads that may work at either end.
//!
//! ## Features
//!
//! - **Deque**: Unsynchronized doubly-linked deque with O(1) operations at both
//!   ends, indexed lookup from either end, and removal by identity
//! - **Bounded Queue**: Monitor around a deque that blocks producers while it
//!   is full and consumers while the data they need is missing
//! - **Metrics**: Optional counters for completed, contended, and fruitless
//!   operations
//!
//! ## Quick Start
//!
//! ```rust
//! use monideque::{BoundedQueue, End};
//!
//! let queue = BoundedQueue::new(100);
//! queue.put(End::Tail, 42);
//! queue.put(End::Head, 7);
//! assert_eq!(queue.ith(End::Head, 1), Ok(42));
//! assert_eq!(queue.get(End::Head), 7);
//! ```
//!
//! ## Thread Safety
//!
//! [`Deque`] is a plain single-threaded container. [`BoundedQueue`] takes
//! `&self` everywhere and is `Sync` whenever its payload is `Send`, so it can be
//! shared through an `Arc` by any number of producers and consumers.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events under the `monideque::deque` and
//! `monideque::queue` targets and installs no subscriber of its own.

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod config;
pub mod deque;
pub mod identity;
pub mod metrics;
pub mod queue;

mod sync;

pub use crate::config::{QueueConfig, WakePolicy};
pub use crate::deque::{Deque, End};
pub use crate::identity::Identity;
pub use crate::queue::BoundedQueue;

/// Error types for monideque operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Tried to remove from an empty deque
    #[error("Deque is empty")]
    Empty,
    /// Index not smaller than the current length
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Length at the time of the request
        len: usize,
    },
    /// Index a bounded queue can never hold, however long the caller waits
    #[error("Index {index} can never be filled in a queue of capacity {capacity}")]
    IndexBeyondCapacity {
        /// Requested index
        index: usize,
        /// Capacity of the queue
        capacity: usize,
    },
}

/// Result type for monideque operations
pub type Result<T> = core::result::Result<T, Error>;
