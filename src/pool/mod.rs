//! Block pool interface.
//!
//! Buffers and sequences never allocate directly. They rent [`Block`]s from a
//! [`BlockPool`] and hand them back through [`BlockPool::release`]. The pool
//! is an injected capability, so tests can swap in a counting mock and
//! callers can share one [`ArrayPool`] between many structures through `&P`
//! or `Rc<P>`.

mod array;
mod block;

use std::rc::Rc;

pub use array::{ArrayPool, PoolStats};
pub use block::Block;

/// Source of fixed-capacity blocks.
///
/// Implementations must uphold:
/// - `rent(n)` returns a block with `len() >= n` (it may be larger).
/// - `release(block, true)` resets every element to its default value before
///   the block can be handed to another renter.
pub trait BlockPool<T> {
    /// Rents a block holding at least `min_size` elements.
    fn rent(&self, min_size: usize) -> Block<T>;

    /// Returns a block to the pool, optionally clearing it first.
    fn release(&self, block: Block<T>, clear: bool);
}

impl<T, P: BlockPool<T> + ?Sized> BlockPool<T> for &P {
    #[inline]
    fn rent(&self, min_size: usize) -> Block<T> {
        (**self).rent(min_size)
    }

    #[inline]
    fn release(&self, block: Block<T>, clear: bool) {
        (**self).release(block, clear)
    }
}

impl<T, P: BlockPool<T> + ?Sized> BlockPool<T> for Rc<P> {
    #[inline]
    fn rent(&self, min_size: usize) -> Block<T> {
        (**self).rent(min_size)
    }

    #[inline]
    fn release(&self, block: Block<T>, clear: bool) {
        (**self).release(block, clear)
    }
}
