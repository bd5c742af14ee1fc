//! Payload identity
//!
//! By-value removal looks for *the same* payload, not an equal one. Handles
//! compare by address, scalars compare by bits.

use std::rc::Rc;
use std::sync::Arc;

/// Types whose values can be compared by identity.
///
/// # Examples
///
/// ```rust
/// use monideque::Identity;
/// use std::sync::Arc;
///
/// let a = Arc::new(String::from("job"));
/// let b = Arc::new(String::from("job"));
///
/// assert!(a.is_same(&Arc::clone(&a)));
/// assert!(!a.is_same(&b));
/// ```
pub trait Identity {
    /// Returns `true` if `self` and `other` refer to the same payload.
    fn is_same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Arc<T> {
    #[inline]
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    #[inline]
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for &T {
    #[inline]
    fn is_same(&self, other: &Self) -> bool {
        core::ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Identity for *const T {
    #[inline]
    fn is_same(&self, other: &Self) -> bool {
        core::ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Identity for *mut T {
    #[inline]
    fn is_same(&self, other: &Self) -> bool {
        core::ptr::eq(*self, *other)
    }
}

macro_rules! bitwise_identity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                #[inline]
                fn is_same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

bitwise_identity!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool,
);

macro_rules! float_identity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                #[inline]
                fn is_same(&self, other: &Self) -> bool {
                    self.to_bits() == other.to_bits()
                }
            }
        )*
    };
}

float_identity!(f32, f64);
