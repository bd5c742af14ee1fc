//! Deque (double-ended queue) implementations
//!
//! This module provides the unsynchronized building block used by the blocking
//! queue.
//!
//! ## Available Deques
//!
//! - [`Deque`]: Doubly-linked deque with O(1) end operations, indexed lookup
//!   from either end, and removal by identity
//!
//! ## Choosing a Deque
//!
//! - Use `Deque` directly when a single thread owns the data
//! - Wrap it in [`BoundedQueue`](crate::queue::BoundedQueue) to hand work
//!   between threads

pub mod linked;

pub use self::linked::{Deque, End, IntoIter, Iter};


#[cfg(test)]
mod proptests;
