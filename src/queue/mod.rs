//! Queue implementations
//!
//! This module provides the blocking, thread-safe wrapper around
//! [`Deque`](crate::deque::Deque).
//!
//! ## Available Queues
//!
//! - [`BoundedQueue`]: Multi-producer, multi-consumer blocking deque with an
//!   optional capacity bound
//!
//! ## Blocking Protocol
//!
//! - **Monitor**: One mutex guards the deque; two condition variables announce
//!   freed capacity and new data
//! - **Guards**: `put` waits while full, `get` and `remove_by_value` wait while
//!   empty, `ith` waits until enough values are present
//! - **Wake policy**: [`WakePolicy`](crate::config::WakePolicy) picks between
//!   precise signalling and the classic monitor pattern
//! - **Comprehensive testing**: Unit tests, stress tests, property tests, and
//!   model checking with loom
//!
//! ## State Machine
//!
//! | State | `put` | `get` / `remove_by_value` | `ith(i)` |
//! |-------|-------|---------------------------|----------|
//! | Empty | runs | blocks | blocks |
//! | Partial | runs | runs | runs once `len > i` |
//! | Full (capacity > 0) | blocks | runs | runs once `len > i` |
//!
//! ## Examples
//!
//! ```rust
//! use monideque::deque::End;
//! use monideque::queue::BoundedQueue;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let queue = Arc::new(BoundedQueue::new(4));
//!
//! let producers: Vec<_> = (0..8)
//!     .map(|i| {
//!         let queue = Arc::clone(&queue);
//!         thread::spawn(move || queue.put(End::Tail, i))
//!     })
//!     .collect();
//!
//! let mut seen: Vec<i32> = (0..8).map(|_| queue.get(End::Head)).collect();
//! for producer in producers {
//!     producer.join().unwrap();
//! }
//!
//! seen.sort();
//! assert_eq!(seen, (0..8).collect::<Vec<_>>());
//! ```

pub mod bounded;

pub use bounded::BoundedQueue;


#[cfg(all(test, not(loom)))]
mod proptests;
