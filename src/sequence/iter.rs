//! Segment iterators - Segments and SegmentsMut.

use std::iter::FusedIterator;
use std::slice;

use super::segment::Segment;

/// Iterator over the blocks of a [`SegmentedSequence`](super::SegmentedSequence),
/// first to last.
///
/// Each item is the full block of one segment. Every call to
/// [`segments`](super::SegmentedSequence::segments) starts a fresh pass.
pub struct Segments<'a, T> {
    first: Option<&'a Segment<T>>,
    rest: slice::Iter<'a, Segment<T>>,
}

impl<'a, T> Segments<'a, T> {
    pub(crate) fn new(first: &'a Segment<T>, rest: &'a [Segment<T>]) -> Self {
        Self {
            first: Some(first),
            rest: rest.iter(),
        }
    }
}

impl<'a, T> Iterator for Segments<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        self.first
            .take()
            .or_else(|| self.rest.next())
            .map(|segment| segment.block.as_slice())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for Segments<'_, T> {
    fn len(&self) -> usize {
        usize::from(self.first.is_some()) + self.rest.len()
    }
}

impl<T> FusedIterator for Segments<'_, T> {}

impl<T> Clone for Segments<'_, T> {
    fn clone(&self) -> Self {
        Self {
            first: self.first,
            rest: self.rest.clone(),
        }
    }
}

/// Mutable iterator over the blocks of a
/// [`SegmentedSequence`](super::SegmentedSequence), first to last.
pub struct SegmentsMut<'a, T> {
    first: Option<&'a mut Segment<T>>,
    rest: slice::IterMut<'a, Segment<T>>,
}

impl<'a, T> SegmentsMut<'a, T> {
    pub(crate) fn new(first: &'a mut Segment<T>, rest: &'a mut [Segment<T>]) -> Self {
        Self {
            first: Some(first),
            rest: rest.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for SegmentsMut<'a, T> {
    type Item = &'a mut [T];

    fn next(&mut self) -> Option<Self::Item> {
        self.first
            .take()
            .or_else(|| self.rest.next())
            .map(|segment| segment.block.as_mut_slice())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for SegmentsMut<'_, T> {
    fn len(&self) -> usize {
        usize::from(self.first.is_some()) + self.rest.len()
    }
}

impl<T> FusedIterator for SegmentsMut<'_, T> {}
