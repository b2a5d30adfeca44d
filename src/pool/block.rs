//! The Block type - a fixed-capacity region rented from a pool.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// A fixed-capacity array handle obtained from a [`BlockPool`](super::BlockPool).
///
/// A block is owned by exactly one structure at a time and is never aliased.
/// Its length never changes after creation.
///
/// # Example
///
/// ```
/// use poolbuf::Block;
///
/// let mut block = Block::<u32>::filled(4);
/// block[0] = 7;
/// assert_eq!(block.as_slice(), &[7, 0, 0, 0]);
/// ```
pub struct Block<T> {
    data: Box<[T]>,
}

impl<T> Block<T> {
    /// Wraps an owned slice.
    pub fn from_boxed(data: Box<[T]>) -> Self {
        Self { data }
    }

    /// Consumes the block and returns the underlying slice.
    pub fn into_boxed(self) -> Box<[T]> {
        self.data
    }

    /// Number of elements the block holds.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true for a zero-length block.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the whole block as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the whole block as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Default> Block<T> {
    /// Allocates a block of `len` default values.
    pub fn filled(len: usize) -> Self {
        Self {
            data: std::iter::repeat_with(T::default).take(len).collect(),
        }
    }

    /// Resets every element to `T::default()`.
    pub fn clear(&mut self) {
        self.data.fill_with(T::default);
    }
}

/// An empty block. Does not allocate.
impl<T> Default for Block<T> {
    fn default() -> Self {
        Self {
            data: Box::default(),
        }
    }
}

impl<T> Deref for Block<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T> DerefMut for Block<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> From<Vec<T>> for Block<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_boxed(data.into_boxed_slice())
    }
}

impl<T> fmt::Debug for Block<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block").field("len", &self.len()).finish()
    }
}
