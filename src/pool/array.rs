//! Bucketed block pool for efficient memory reuse.

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::config::PoolConfig;
use crate::error::BufferError;

use super::{Block, BlockPool};

/// Counters describing pool activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Calls to `rent`.
    pub rented: u64,
    /// Calls to `release`.
    pub released: u64,
    /// Rents served from an idle block.
    pub reused: u64,
    /// Rents that had to allocate.
    pub allocated: u64,
    /// Released blocks that were dropped instead of kept.
    pub discarded: u64,
}

impl PoolStats {
    /// Blocks rented and not yet released.
    ///
    /// Blocks rented elsewhere and released here can push `released` past
    /// `rented`; the result saturates at zero.
    pub fn outstanding(&self) -> u64 {
        self.rented.saturating_sub(self.released)
    }
}

/// A single-threaded pool of power-of-two sized blocks.
///
/// Each bucket holds idle blocks of one length. A rent request is rounded up
/// to the next bucket length; requests beyond the largest bucket get an
/// exact-size block that is dropped when released. Each bucket keeps at most
/// [`PoolConfig::max_blocks_per_bucket`] idle blocks.
///
/// # Example
///
/// ```
/// use poolbuf::{ArrayPool, BlockPool};
///
/// let pool = ArrayPool::<u8>::new();
/// let block = pool.rent(100);
/// assert_eq!(block.len(), 128);
///
/// pool.release(block, false);
/// let again = pool.rent(120);
/// assert_eq!(pool.stats().reused, 1);
/// # pool.release(again, false);
/// ```
pub struct ArrayPool<T> {
    config: PoolConfig,
    buckets: RefCell<Vec<Vec<Block<T>>>>,
    stats: Cell<PoolStats>,
}

impl<T> ArrayPool<T> {
    /// Creates a pool with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(PoolConfig::default())
    }

    /// Creates a pool with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if the configuration is invalid.
    pub fn with_config(config: PoolConfig) -> Result<Self, BufferError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PoolConfig) -> Self {
        let buckets = (0..config.bucket_count()).map(|_| Vec::new()).collect();
        Self {
            config,
            buckets: RefCell::new(buckets),
            stats: Cell::new(PoolStats::default()),
        }
    }

    /// Returns the pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns a snapshot of the activity counters.
    pub fn stats(&self) -> PoolStats {
        self.stats.get()
    }

    /// Number of idle blocks currently held across all buckets.
    pub fn idle_blocks(&self) -> usize {
        self.buckets.borrow().iter().map(Vec::len).sum()
    }

    /// Drops every idle block.
    pub fn trim(&self) {
        for bucket in self.buckets.borrow_mut().iter_mut() {
            bucket.clear();
        }
    }

    /// Bucket serving a rent of `min_size`, or `None` if it is oversize.
    fn bucket_for_rent(&self, min_size: usize) -> Option<usize> {
        if min_size > self.config.max_block_len() {
            return None;
        }
        let len = min_size.max(self.config.min_block_len()).next_power_of_two();
        Some(self.bucket_index(len))
    }

    /// Bucket accepting a released block of exactly `len` elements.
    fn bucket_for_release(&self, len: usize) -> Option<usize> {
        let in_range = len >= self.config.min_block_len() && len <= self.config.max_block_len();
        (in_range && len.is_power_of_two()).then(|| self.bucket_index(len))
    }

    fn bucket_index(&self, len: usize) -> usize {
        (len.trailing_zeros() - self.config.min_block_len().trailing_zeros()) as usize
    }

    fn bucket_len(&self, index: usize) -> usize {
        self.config.min_block_len() << index
    }

    fn update_stats(&self, f: impl FnOnce(&mut PoolStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }
}

impl<T: Default> BlockPool<T> for ArrayPool<T> {
    fn rent(&self, min_size: usize) -> Block<T> {
        if min_size == 0 {
            self.update_stats(|s| s.rented += 1);
            return Block::default();
        }

        let Some(index) = self.bucket_for_rent(min_size) else {
            tracing::debug!(min_size, "rent exceeds largest bucket, allocating exact block");
            self.update_stats(|s| {
                s.rented += 1;
                s.allocated += 1;
            });
            return Block::filled(min_size);
        };

        let idle = self.buckets.borrow_mut()[index].pop();
        let block = match idle {
            Some(block) => {
                self.update_stats(|s| {
                    s.rented += 1;
                    s.reused += 1;
                });
                block
            }
            None => {
                self.update_stats(|s| {
                    s.rented += 1;
                    s.allocated += 1;
                });
                Block::filled(self.bucket_len(index))
            }
        };

        tracing::trace!(min_size, len = block.len(), "rent block");
        block
    }

    fn release(&self, mut block: Block<T>, clear: bool) {
        self.update_stats(|s| s.released += 1);

        if block.is_empty() {
            return;
        }

        let len = block.len();
        let Some(index) = self.bucket_for_release(len) else {
            tracing::debug!(len, "released block does not fit a bucket, dropping");
            self.update_stats(|s| s.discarded += 1);
            return;
        };

        let mut buckets = self.buckets.borrow_mut();
        let bucket = &mut buckets[index];
        if bucket.len() >= self.config.max_blocks_per_bucket() {
            tracing::debug!(len, "bucket full, dropping released block");
            self.update_stats(|s| s.discarded += 1);
            return;
        }

        if clear {
            block.clear();
        }
        tracing::trace!(len, clear, "release block");
        bucket.push(block);
    }
}

impl<T> Default for ArrayPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ArrayPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayPool")
            .field("config", &self.config)
            .field("idle_blocks", &self.idle_blocks())
            .field("stats", &self.stats())
            .finish()
    }
}
