//! Linked Deque Implementation
//!
//! An unsynchronized doubly-linked deque whose nodes live in an arena and
//! address each other by slot index instead of by pointer.
//!
//! ## Design
//!
//! - Every node carries two links indexed by [`End`]: `links[Head]` points to
//!   the neighbor closer to the head, `links[Tail]` to the one closer to the
//!   tail.
//! - The deque keeps the indices of both end nodes in the same shape, so each
//!   end operation is written once and mirrored by [`End::opposite`].
//! - Released slots are threaded onto a free list and reused by later inserts.
//!
//! ## Performance Characteristics
//!
//! - **put / get**: O(1) at either end
//! - **len**: O(1)
//! - **ith**: O(i) walking from the chosen end
//! - **remove_by_value**: O(n) scan, O(1) splice
//!
//! ## Example
//!
//! ```rust
//! use monideque::deque::{Deque, End};
//!
//! let mut deque = Deque::new();
//! deque.put(End::Tail, "b");
//! deque.put(End::Head, "a");
//! deque.put(End::Tail, "c");
//!
//! assert_eq!(deque.render(), "a b c");
//! assert_eq!(deque.ith(End::Tail, 0), Ok(&"c"));
//! assert_eq!(deque.get(End::Head), Ok("a"));
//! assert_eq!(deque.len(), 2);
//! ```

use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use core::ops::{Index, IndexMut};

use tracing::debug;

use crate::{Error, Identity, Result};

const TARGET: &str = "monideque::deque";

/// One of the two ends of a deque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum End {
    /// The front of the deque.
    Head,
    /// The back of the deque.
    Tail,
}

impl End {
    /// The end across from this one.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            End::Head => End::Tail,
            End::Tail => End::Head,
        }
    }
}

impl fmt::Display for End {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            End::Head => f.write_str("head"),
            End::Tail => f.write_str("tail"),
        }
    }
}

type Link = Option<usize>;

/// A pair of links addressed by [`End`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Links([Link; 2]);

impl Index<End> for Links {
    type Output = Link;

    #[inline]
    fn index(&self, end: End) -> &Link {
        &self.0[end as usize]
    }
}

impl IndexMut<End> for Links {
    #[inline]
    fn index_mut(&mut self, end: End) -> &mut Link {
        &mut self.0[end as usize]
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    links: Links,
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Link },
}

/// An unsynchronized double-ended queue.
///
/// Values can be inserted and removed at either [`End`], looked up by
/// position from either end, and removed from the middle by identity.
/// Callers that share a deque across threads should go through
/// [`BoundedQueue`](crate::queue::BoundedQueue) instead.
///
/// # Examples
///
/// ```rust
/// use monideque::deque::{Deque, End};
///
/// let mut deque: Deque<u32> = Deque::new();
/// deque.put(End::Tail, 1);
/// deque.put(End::Tail, 2);
///
/// // Opposite ends give FIFO order
/// assert_eq!(deque.get(End::Head), Ok(1));
/// assert_eq!(deque.get(End::Head), Ok(2));
/// assert!(deque.get(End::Head).is_err());
/// ```
pub struct Deque<T> {
    slots: Vec<Slot<T>>,
    free: Link,
    ends: Links,
    len: usize,
}

impl<T> Deque<T> {
    /// Creates an empty deque.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            ends: Links([None, None]),
            len: 0,
        }
    }

    /// Creates an empty deque with room for `capacity` nodes before the arena
    /// has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Number of values in the deque.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `value` at `end`.
    ///
    /// The deque is unbounded; capacity limits belong to
    /// [`BoundedQueue`](crate::queue::BoundedQueue).
    pub fn put(&mut self, end: End, value: T) {
        let inward = end.opposite();
        let previous = self.ends[end];

        let mut links = Links::default();
        links[inward] = previous;
        let index = self.alloc(Node { value, links });

        match previous {
            Some(old) => self.node_mut(old).links[end] = Some(index),
            // First node is both head and tail
            None => self.ends[inward] = Some(index),
        }
        self.ends[end] = Some(index);
        self.len += 1;
    }

    /// Removes and returns the value at `end`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the deque holds no values.
    pub fn get(&mut self, end: End) -> Result<T> {
        match self.ends[end] {
            Some(index) => Ok(self.unlink(index)),
            None => {
                debug!(target: TARGET, %end, "get on empty deque");
                Err(Error::Empty)
            }
        }
    }

    /// Returns the value `index` steps in from `end` without removing it.
    ///
    /// `ith(End::Head, 0)` is the head value and `ith(End::Tail, 0)` the tail
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len()`.
    pub fn ith(&self, end: End, index: usize) -> Result<&T> {
        if index >= self.len {
            debug!(target: TARGET, %end, index, len = self.len, "index out of range");
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        let found = match end {
            End::Head => self.iter().nth(index),
            End::Tail => self.iter().rev().nth(index),
        };
        found.ok_or(Error::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    /// Removes the first value identical to `value`, scanning from `end`.
    ///
    /// Identity is decided by [`Identity::is_same`], so two distinct handles
    /// to equal contents do not match. Returns `None` and leaves the deque
    /// untouched when nothing matches.
    pub fn remove_by_value(&mut self, end: End, value: &T) -> Option<T>
    where
        T: Identity,
    {
        let toward = end.opposite();
        let mut cursor = self.ends[end];
        while let Some(index) = cursor {
            let node = self.node(index);
            if node.value.is_same(value) {
                return Some(self.unlink(index));
            }
            cursor = node.links[toward];
        }
        None
    }

    /// Calls `f` on every value from head to tail.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        for value in self.iter() {
            f(value);
        }
    }

    /// Tears the deque down, handing every value to `cleanup` first.
    ///
    /// `cleanup` sees each value exactly once, head to tail. The node arena is
    /// released only after the last call returns. Without a cleanup function
    /// the values are simply dropped; a bare `None` needs its type spelled
    /// out, so prefer [`destroy_with`](Self::destroy_with) or plain `drop`.
    ///
    /// ```rust
    /// use monideque::deque::Deque;
    ///
    /// let deque: Deque<u32> = (0..3).collect();
    /// deque.destroy(None::<fn(u32)>);
    /// ```
    pub fn destroy<F>(self, cleanup: Option<F>)
    where
        F: FnMut(T),
    {
        debug!(target: TARGET, len = self.len, "destroying deque");
        if let Some(cleanup) = cleanup {
            self.into_iter().for_each(cleanup);
        }
    }

    /// Tears the deque down, handing every value to `cleanup` head to tail.
    #[inline]
    pub fn destroy_with<F>(self, cleanup: F)
    where
        F: FnMut(T),
    {
        self.destroy(Some(cleanup))
    }

    /// Renders every value from head to tail separated by single spaces.
    ///
    /// An empty deque renders as an empty string.
    pub fn render(&self) -> String
    where
        T: AsRef<str>,
    {
        let mut out = String::new();
        for value in self.iter() {
            push_word(&mut out, value.as_ref());
        }
        out
    }

    /// Like [`render`](Self::render), formatting each value with `fmt`.
    pub fn render_with<F, S>(&self, mut fmt: F) -> String
    where
        F: FnMut(&T) -> S,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for value in self.iter() {
            push_word(&mut out, fmt(value).as_ref());
        }
        out
    }

    /// Returns a double-ended iterator from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            deque: self,
            front: self.ends[End::Head],
            back: self.ends[End::Tail],
            remaining: self.len,
        }
    }

    /// Inserts `value` at the head.
    #[inline]
    pub fn head_put(&mut self, value: T) {
        self.put(End::Head, value)
    }

    /// Removes the head value.
    #[inline]
    pub fn head_get(&mut self) -> Result<T> {
        self.get(End::Head)
    }

    /// Value `index` steps from the head.
    #[inline]
    pub fn head_ith(&self, index: usize) -> Result<&T> {
        self.ith(End::Head, index)
    }

    /// Removes `value` scanning from the head.
    #[inline]
    pub fn head_rem(&mut self, value: &T) -> Option<T>
    where
        T: Identity,
    {
        self.remove_by_value(End::Head, value)
    }

    /// Inserts `value` at the tail.
    #[inline]
    pub fn tail_put(&mut self, value: T) {
        self.put(End::Tail, value)
    }

    /// Removes the tail value.
    #[inline]
    pub fn tail_get(&mut self) -> Result<T> {
        self.get(End::Tail)
    }

    /// Value `index` steps from the tail.
    #[inline]
    pub fn tail_ith(&self, index: usize) -> Result<&T> {
        self.ith(End::Tail, index)
    }

    /// Removes `value` scanning from the tail.
    #[inline]
    pub fn tail_rem(&mut self, value: &T) -> Option<T>
    where
        T: Identity,
    {
        self.remove_by_value(End::Tail, value)
    }

    /// Splices the node at `index` out of the chain and returns its value.
    fn unlink(&mut self, index: usize) -> T {
        let node = self.release(index);
        let toward_head = node.links[End::Head];
        let toward_tail = node.links[End::Tail];

        match toward_head {
            Some(prev) => self.node_mut(prev).links[End::Tail] = toward_tail,
            None => self.ends[End::Head] = toward_tail,
        }
        match toward_tail {
            Some(next) => self.node_mut(next).links[End::Head] = toward_head,
            None => self.ends[End::Tail] = toward_head,
        }

        self.len -= 1;
        node.value
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free {
            Some(index) => {
                let slot = mem::replace(&mut self.slots[index], Slot::Occupied(node));
                self.free = match slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at a live node"),
                };
                index
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, index: usize) -> Node<T> {
        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        match mem::replace(&mut self.slots[index], vacant) {
            Slot::Occupied(node) => {
                self.free = Some(index);
                node
            }
            Slot::Vacant { .. } => unreachable!("released a vacant slot"),
        }
    }

    #[inline]
    fn node(&self, index: usize) -> &Node<T> {
        match &self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }

    #[inline]
    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match &mut self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }
}

fn push_word(out: &mut String, word: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(word);
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.put(End::Tail, value);
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Self::with_capacity(iter.size_hint().0);
        deque.extend(iter);
        deque
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

/// Borrowing iterator over a [`Deque`], head to tail.
#[derive(Debug)]
pub struct Iter<'a, T> {
    deque: &'a Deque<T>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.deque.node(self.front?);
        self.front = node.links[End::Tail];
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.deque.node(self.back?);
        self.back = node.links[End::Head];
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Owning iterator over a [`Deque`], head to tail.
#[derive(Debug)]
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let index = self.deque.ends[End::Head]?;
        Some(self.deque.unlink(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len, Some(self.deque.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        let index = self.deque.ends[End::Tail]?;
        Some(self.deque.unlink(index))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
impl<T> Deque<T> {
    /// Number of arena slots, live or free.
    pub(crate) fn arena_len(&self) -> usize {
        self.slots.len()
    }

    /// Checks every structural invariant, panicking on the first violation.
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(
            self.ends[End::Head].is_none(),
            self.len == 0,
            "head must be absent exactly when empty"
        );
        assert_eq!(
            self.ends[End::Tail].is_none(),
            self.len == 0,
            "tail must be absent exactly when empty"
        );

        let mut forward = Vec::with_capacity(self.len);
        let mut cursor = self.ends[End::Head];
        let mut previous = None;
        while let Some(index) = cursor {
            let node = self.node(index);
            assert_eq!(node.links[End::Head], previous, "back link mismatch");
            forward.push(index);
            previous = Some(index);
            cursor = node.links[End::Tail];
            assert!(forward.len() <= self.len, "cycle in tail-ward links");
        }
        assert_eq!(forward.len(), self.len, "length disagrees with chain");
        assert_eq!(previous, self.ends[End::Tail], "chain does not end at tail");

        let mut backward = Vec::with_capacity(self.len);
        let mut cursor = self.ends[End::Tail];
        while let Some(index) = cursor {
            backward.push(index);
            cursor = self.node(index).links[End::Head];
            assert!(backward.len() <= self.len, "cycle in head-ward links");
        }
        backward.reverse();
        assert_eq!(forward, backward, "walks disagree");

        let live = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count();
        assert_eq!(live, self.len, "unreachable live node in arena");
    }
}
