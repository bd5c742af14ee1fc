//! Synchronization primitives used by the monitor.
//!
//! Under `--cfg loom` these resolve to loom's model-checked versions so the
//! blocking protocol in [`crate::queue`] can be explored exhaustively.

#[cfg(loom)]
pub(crate) use loom::sync::{Condvar, Mutex, MutexGuard};

#[cfg(not(loom))]
pub(crate) use std::sync::{Condvar, Mutex, MutexGuard};
