//! Multi-segment pool-backed sequence.
//!
//! A [`SegmentedSequence`] accumulates pooled blocks in an append-only chain
//! and indexes them as one logical stream. Growth links a new block at the
//! tail and never moves data already written.
//!
//! ```text
//!   segment 0          segment 1              segment 2
//! [ri=0, len=16] -> [ri=16, len=64] -> [ri=80, len=16]     length() == 96
//! ```

mod iter;
mod segment;

use std::fmt;
use std::iter::once;
use std::mem;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{BufferError, Result};
use crate::pool::{ArrayPool, BlockPool};

pub use iter::{Segments, SegmentsMut};
use segment::Segment;

/// A growable sequence backed by a chain of blocks from a [`BlockPool`].
///
/// The sequence always owns at least one non-empty segment. Segments are
/// contiguous in index space: each one starts where its predecessor ends.
///
/// [`get_span`](Self::get_span) returns the *whole* block of the segment
/// containing an index, not a slice starting at it. Use
/// [`locate`](Self::locate) to get the offset inside that block.
///
/// # Example
///
/// ```
/// use poolbuf::SegmentedSequence;
///
/// let mut seq = SegmentedSequence::<u32>::new(1)?;
/// seq.grow(5)?;
/// assert!(seq.length() >= 6);
///
/// let tail = seq.get_span(seq.length() - 5)?;
/// assert!(tail.len() >= 5);
/// assert_eq!(seq.segments().count(), 2);
/// # Ok::<(), poolbuf::BufferError>(())
/// ```
pub struct SegmentedSequence<T, P = ArrayPool<T>>
where
    P: BlockPool<T>,
{
    first: Segment<T>,
    /// Successors of `first` in chain order. The tail is `rest.last()`.
    rest: Vec<Segment<T>>,
    pool: P,
}

impl<T: Default> SegmentedSequence<T, ArrayPool<T>> {
    /// Creates a sequence with its own [`ArrayPool`].
    pub fn new(min_initial_size: usize) -> Result<Self> {
        Self::new_in(min_initial_size, ArrayPool::new())
    }
}

impl<T, P: BlockPool<T>> SegmentedSequence<T, P> {
    /// Creates a sequence with one segment of at least `min_initial_size`.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `min_initial_size` is zero. The
    /// pool is not touched in that case.
    pub fn new_in(min_initial_size: usize, pool: P) -> Result<Self> {
        check_segment_size("min_initial_size", min_initial_size)?;

        let block = pool.rent(min_initial_size);
        Ok(Self {
            first: Segment::new(block, 0),
            rest: Vec::new(),
            pool,
        })
    }

    /// Rents another block of at least `min_size` and links it at the tail.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `min_size` is zero.
    pub fn grow(&mut self, min_size: usize) -> Result<()> {
        check_segment_size("min_size", min_size)?;

        let running_index = self.last().end();
        let block = self.pool.rent(min_size);
        self.rest.push(Segment::new(block, running_index));

        tracing::trace!(
            min_size,
            running_index,
            segments = self.segment_count(),
            "grew sequence"
        );
        Ok(())
    }

    /// Total number of elements across all segments.
    #[inline]
    pub fn length(&self) -> u64 {
        self.last().end()
    }

    /// Number of segments in the chain.
    #[inline]
    pub fn segment_count(&self) -> usize {
        1 + self.rest.len()
    }

    /// Returns the full block of the segment containing `element_index`.
    ///
    /// The slice starts at that segment's running index, so it is longer than
    /// `element_index - running_index`. See [`locate`](Self::locate) for the
    /// offset itself.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `element_index >= length()`.
    pub fn get_span(&self, element_index: u64) -> Result<&[T]> {
        self.check_index(element_index)?;
        self.chain()
            .find(|segment| segment.local_offset(element_index).is_some())
            .map(|segment| segment.block.as_slice())
            .ok_or_else(|| self.out_of_range(element_index))
    }

    /// Mutable variant of [`get_span`](Self::get_span).
    pub fn get_span_mut(&mut self, element_index: u64) -> Result<&mut [T]> {
        self.check_index(element_index)?;
        let length = self.length();
        once(&mut self.first)
            .chain(self.rest.iter_mut())
            .find(|segment| segment.local_offset(element_index).is_some())
            .map(|segment| segment.block.as_mut_slice())
            .ok_or_else(|| out_of_range(element_index, length))
    }

    /// Returns `(segment, offset)` for `element_index`: the position of its
    /// segment in the chain and its offset inside that segment's block.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `element_index >= length()`.
    pub fn locate(&self, element_index: u64) -> Result<(usize, usize)> {
        self.check_index(element_index)?;
        self.chain()
            .enumerate()
            .find_map(|(ordinal, segment)| {
                segment
                    .local_offset(element_index)
                    .map(|offset| (ordinal, offset))
            })
            .ok_or_else(|| self.out_of_range(element_index))
    }

    /// Iterates over the segment blocks in chain order.
    pub fn segments(&self) -> Segments<'_, T> {
        Segments::new(&self.first, &self.rest)
    }

    /// Iterates mutably over the segment blocks in chain order.
    pub fn segments_mut(&mut self) -> SegmentsMut<'_, T> {
        SegmentsMut::new(&mut self.first, &mut self.rest)
    }

    /// Returns every block to the pool, first to last, clearing each one.
    ///
    /// Dropping the sequence does the same.
    pub fn dispose(self) {
        drop(self);
    }

    fn last(&self) -> &Segment<T> {
        self.rest.last().unwrap_or(&self.first)
    }

    fn chain(&self) -> impl Iterator<Item = &Segment<T>> {
        once(&self.first).chain(self.rest.iter())
    }

    fn check_index(&self, element_index: u64) -> Result<()> {
        if element_index >= self.length() {
            return Err(self.out_of_range(element_index));
        }
        Ok(())
    }

    fn out_of_range(&self, element_index: u64) -> BufferError {
        out_of_range(element_index, self.length())
    }
}

impl<P: BlockPool<u8>> SegmentedSequence<u8, P> {
    /// Copies the first `len` bytes of the sequence into one [`Bytes`].
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `len > length()`.
    pub fn copy_to_bytes(&self, len: u64) -> Result<Bytes> {
        if len > self.length() {
            return Err(BufferError::invalid_arg(
                "len",
                format!("{} exceeds sequence length {}", len, self.length()),
            ));
        }

        let mut out = BytesMut::with_capacity(len as usize);
        let mut remaining = len as usize;
        for span in self.segments() {
            if remaining == 0 {
                break;
            }
            let take = remaining.min(span.len());
            out.put_slice(&span[..take]);
            remaining -= take;
        }
        Ok(out.freeze())
    }
}

impl<T, P: BlockPool<T>> Drop for SegmentedSequence<T, P> {
    fn drop(&mut self) {
        tracing::trace!(
            segments = self.segment_count(),
            length = self.length(),
            "dispose sequence"
        );
        self.pool.release(mem::take(&mut self.first.block), true);
        for segment in self.rest.drain(..) {
            self.pool.release(segment.block, true);
        }
    }
}

impl<'a, T, P: BlockPool<T>> IntoIterator for &'a SegmentedSequence<T, P> {
    type Item = &'a [T];
    type IntoIter = Segments<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments()
    }
}

impl<'a, T, P: BlockPool<T>> IntoIterator for &'a mut SegmentedSequence<T, P> {
    type Item = &'a mut [T];
    type IntoIter = SegmentsMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments_mut()
    }
}

impl<T, P: BlockPool<T>> fmt::Debug for SegmentedSequence<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedSequence")
            .field("segments", &self.segment_count())
            .field("length", &self.length())
            .finish()
    }
}

fn check_segment_size(name: &'static str, size: usize) -> Result<()> {
    if size < 1 {
        return Err(BufferError::invalid_arg(name, "must be at least 1"));
    }
    Ok(())
}

fn out_of_range(element_index: u64, length: u64) -> BufferError {
    BufferError::invalid_arg(
        "element_index",
        format!("{} is out of range 0..{}", element_index, length),
    )
}
