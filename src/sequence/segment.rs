//! One link of a segmented sequence.

use crate::pool::Block;

/// A pooled block plus its position in the logical sequence.
///
/// Segments carry no `next` link: a segment's successor is the next element
/// of the owning sequence's `rest` vector, and the tail is its last element.
pub(crate) struct Segment<T> {
    pub(crate) block: Block<T>,
    /// Total length of every segment before this one.
    pub(crate) running_index: u64,
}

impl<T> Segment<T> {
    pub(crate) fn new(block: Block<T>, running_index: u64) -> Self {
        Self {
            block,
            running_index,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.block.len()
    }

    /// First index past this segment; the successor's running index.
    #[inline]
    pub(crate) fn end(&self) -> u64 {
        self.running_index + self.len() as u64
    }

    /// Offset of `index` inside this segment, if it falls here.
    ///
    /// `running_index <= index < end()  <=>  0 <= index - running_index < len`
    #[inline]
    pub(crate) fn local_offset(&self, index: u64) -> Option<usize> {
        index
            .checked_sub(self.running_index)
            .filter(|&offset| offset < self.len() as u64)
            .map(|offset| offset as usize)
    }
}
