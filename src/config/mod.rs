//! Configuration for the bundled block pool.
//!
//! - [`PoolConfig`] - Bucket sizes and retention limits for [`ArrayPool`](crate::ArrayPool)
//!
//! # Example
//!
//! ```
//! use poolbuf::PoolConfig;
//!
//! let config = PoolConfig::new(64, 64 * 1024, 4)?;
//!
//! let config = PoolConfig::default()
//!     .with_max_blocks_per_bucket(16);
//! # Ok::<(), poolbuf::BufferError>(())
//! ```

use crate::error::BufferError;

/// Default smallest bucket (16 elements).
pub const DEFAULT_MIN_BLOCK_LEN: usize = 16;

/// Default largest bucket (1 Mi elements).
pub const DEFAULT_MAX_BLOCK_LEN: usize = 1024 * 1024;

/// Default number of idle blocks kept per bucket.
pub const DEFAULT_MAX_BLOCKS_PER_BUCKET: usize = 8;

/// Configuration for [`ArrayPool`](crate::ArrayPool).
///
/// Block lengths are measured in elements, not bytes. Buckets are the powers
/// of two from `min_block_len` to `max_block_len` inclusive. Rent requests
/// larger than `max_block_len` bypass the pool.
///
/// # Example
///
/// ```
/// use poolbuf::PoolConfig;
///
/// let config = PoolConfig::default()
///     .with_min_block_len(32)
///     .with_max_block_len(4096);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.bucket_count(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    min_block_len: usize,
    max_block_len: usize,
    max_blocks_per_bucket: usize,
}

impl PoolConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if:
    /// - Either block length is zero
    /// - Either block length is not a power of 2
    /// - `min_block_len > max_block_len`
    ///
    /// `max_blocks_per_bucket` may be zero, which disables retention.
    pub fn new(
        min_block_len: usize,
        max_block_len: usize,
        max_blocks_per_bucket: usize,
    ) -> Result<Self, BufferError> {
        if min_block_len == 0 || max_block_len == 0 {
            return Err(BufferError::InvalidConfig {
                message: "block lengths must be non-zero",
            });
        }

        if min_block_len > max_block_len {
            return Err(BufferError::InvalidConfig {
                message: "min_block_len cannot be greater than max_block_len",
            });
        }

        if !min_block_len.is_power_of_two() || !max_block_len.is_power_of_two() {
            return Err(BufferError::InvalidConfig {
                message: "block lengths must be powers of 2",
            });
        }

        Ok(Self {
            min_block_len,
            max_block_len,
            max_blocks_per_bucket,
        })
    }

    /// Sets the smallest bucket length.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check it.
    pub fn with_min_block_len(mut self, len: usize) -> Self {
        self.min_block_len = len;
        self
    }

    /// Sets the largest bucket length.
    pub fn with_max_block_len(mut self, len: usize) -> Self {
        self.max_block_len = len;
        self
    }

    /// Sets how many idle blocks each bucket keeps.
    pub fn with_max_blocks_per_bucket(mut self, count: usize) -> Self {
        self.max_blocks_per_bucket = count;
        self
    }

    /// Returns the smallest bucket length.
    pub fn min_block_len(&self) -> usize {
        self.min_block_len
    }

    /// Returns the largest bucket length.
    pub fn max_block_len(&self) -> usize {
        self.max_block_len
    }

    /// Returns the per-bucket retention limit.
    pub fn max_blocks_per_bucket(&self) -> usize {
        self.max_blocks_per_bucket
    }

    /// Number of buckets described by this configuration.
    ///
    /// Only meaningful for a valid configuration.
    pub fn bucket_count(&self) -> usize {
        (self.max_block_len.trailing_zeros() - self.min_block_len.trailing_zeros()) as usize + 1
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), BufferError> {
        Self::new(
            self.min_block_len,
            self.max_block_len,
            self.max_blocks_per_bucket,
        )
        .map(|_| ())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_block_len: DEFAULT_MIN_BLOCK_LEN,
            max_block_len: DEFAULT_MAX_BLOCK_LEN,
            max_blocks_per_bucket: DEFAULT_MAX_BLOCKS_PER_BUCKET,
        }
    }
}
