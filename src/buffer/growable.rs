//! The GrowableBuffer type.

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};
use std::slice::{self, SliceIndex};

use bytes::Bytes;

use crate::error::{BufferError, Result};
use crate::pool::{ArrayPool, Block, BlockPool};

/// A growable buffer backed by a single block from a [`BlockPool`].
///
/// The buffer tracks two sizes:
/// - capacity: the length of the backing block, which only ever grows
/// - length: how many leading elements hold valid data, set by the owner
///
/// Growth never happens implicitly. Element and range access is checked
/// against capacity, not length.
///
/// Views returned by [`full_span`](Self::full_span),
/// [`data_span`](Self::data_span) and indexing borrow the buffer, so they
/// cannot outlive a growth or disposal.
///
/// # Example
///
/// ```
/// use poolbuf::GrowableBuffer;
///
/// let mut buf = GrowableBuffer::<u8>::new(1);
/// buf.grow(5)?;
/// assert!(buf.capacity() >= 6);
///
/// buf.extend_from_slice(b"hello")?;
/// assert_eq!(buf.data_span(), b"hello");
/// # Ok::<(), poolbuf::BufferError>(())
/// ```
pub struct GrowableBuffer<T, P = ArrayPool<T>>
where
    P: BlockPool<T>,
{
    block: Block<T>,
    len: usize,
    pool: P,
}

impl<T: Default> GrowableBuffer<T, ArrayPool<T>> {
    /// Creates a buffer with its own [`ArrayPool`].
    pub fn new(min_capacity: usize) -> Self {
        Self::new_in(min_capacity, ArrayPool::new())
    }
}

impl<T: Default + Clone> GrowableBuffer<T, ArrayPool<T>> {
    /// Creates a buffer with its own [`ArrayPool`], initialized with `initial_data`.
    pub fn from_slice(initial_data: &[T]) -> Self {
        Self::from_slice_in(initial_data, ArrayPool::new())
    }
}

impl<T, P: BlockPool<T>> GrowableBuffer<T, P> {
    /// Creates an empty buffer holding at least `min_capacity` elements.
    pub fn new_in(min_capacity: usize, pool: P) -> Self {
        let block = pool.rent(min_capacity);
        Self {
            block,
            len: 0,
            pool,
        }
    }

    /// Creates a buffer whose leading elements and length are `initial_data`.
    pub fn from_slice_in(initial_data: &[T], pool: P) -> Self
    where
        T: Clone,
    {
        let mut buf = Self::new_in(initial_data.len(), pool);
        buf.block[..initial_data.len()].clone_from_slice(initial_data);
        buf.len = initial_data.len();
        buf
    }

    /// Number of elements the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.block.len()
    }

    /// Length of the valid area at the start of the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when no element is marked valid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the length of the valid area.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `len > capacity()`.
    pub fn set_len(&mut self, len: usize) -> Result<()> {
        if len > self.capacity() {
            return Err(BufferError::invalid_arg(
                "len",
                format!("{} exceeds capacity {}", len, self.capacity()),
            ));
        }
        self.len = len;
        Ok(())
    }

    /// The whole backing block, `[0, capacity)`.
    #[inline]
    pub fn full_span(&self) -> &[T] {
        self.block.as_slice()
    }

    /// Mutable view of the whole backing block.
    #[inline]
    pub fn full_span_mut(&mut self) -> &mut [T] {
        self.block.as_mut_slice()
    }

    /// The valid area, `[0, len)`.
    #[inline]
    pub fn data_span(&self) -> &[T] {
        &self.block[..self.len]
    }

    /// Mutable view of the valid area.
    #[inline]
    pub fn data_span_mut(&mut self) -> &mut [T] {
        &mut self.block[..self.len]
    }

    /// Iterates over all `capacity` elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.block.iter()
    }

    /// Replaces the backing block with one of `capacity() + by_at_least`
    /// elements, moving every element (not only the valid area) across.
    ///
    /// The length is left unchanged.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if the new capacity overflows `usize`.
    /// The buffer is untouched in that case.
    pub fn grow(&mut self, by_at_least: usize) -> Result<()> {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity.checked_add(by_at_least).ok_or_else(|| {
            BufferError::invalid_arg(
                "by_at_least",
                format!("capacity {} + {} overflows", old_capacity, by_at_least),
            )
        })?;

        let mut block = self.pool.rent(new_capacity);
        block[..old_capacity].swap_with_slice(&mut self.block);
        let old = mem::replace(&mut self.block, block);
        self.pool.release(old, mem::needs_drop::<T>());

        tracing::trace!(
            from = old_capacity,
            to = self.capacity(),
            "grew buffer"
        );
        Ok(())
    }

    /// Grows the buffer if it holds fewer than `min_capacity` elements.
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> Result<()> {
        let capacity = self.capacity();
        if capacity >= min_capacity {
            return Ok(());
        }
        self.grow(min_capacity - capacity)
    }

    /// Appends `data` after the valid area, growing first if needed.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if the resulting length overflows.
    pub fn extend_from_slice(&mut self, data: &[T]) -> Result<()>
    where
        T: Clone,
    {
        let end = self.len.checked_add(data.len()).ok_or_else(|| {
            BufferError::invalid_arg(
                "data",
                format!("length {} + {} overflows", self.len, data.len()),
            )
        })?;
        self.ensure_capacity(end)?;
        self.block[self.len..end].clone_from_slice(data);
        self.len = end;
        Ok(())
    }

    /// Returns the block to the pool.
    ///
    /// The block is cleared on release when `T` owns resources. Dropping the
    /// buffer does the same; this method only makes the release explicit.
    pub fn dispose(self) {
        drop(self);
    }
}

impl<P: BlockPool<u8>> GrowableBuffer<u8, P> {
    /// Copies the valid area into a [`Bytes`].
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.data_span())
    }
}

impl<T, P: BlockPool<T>> Drop for GrowableBuffer<T, P> {
    fn drop(&mut self) {
        let block = mem::take(&mut self.block);
        tracing::trace!(capacity = block.len(), "dispose buffer");
        self.pool.release(block, mem::needs_drop::<T>());
    }
}

impl<T, P, I> Index<I> for GrowableBuffer<T, P>
where
    P: BlockPool<T>,
    I: SliceIndex<[T]>,
{
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.block.as_slice()[index]
    }
}

impl<T, P, I> IndexMut<I> for GrowableBuffer<T, P>
where
    P: BlockPool<T>,
    I: SliceIndex<[T]>,
{
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.block.as_mut_slice()[index]
    }
}

impl<'a, T, P: BlockPool<T>> IntoIterator for &'a GrowableBuffer<T, P> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, P: BlockPool<T>> fmt::Debug for GrowableBuffer<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .finish()
    }
}
