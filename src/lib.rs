//! poolbuf
//!
//! Pool-backed growable buffers for Rust.
//!
//! `poolbuf` accumulates data of unknown final size without hitting the
//! allocator on every resize. Memory comes from a [`BlockPool`] and goes back
//! to it exactly once. Two structures are provided, with different growth
//! contracts:
//!
//! - [`GrowableBuffer`] - one contiguous block; growth copies, O(capacity)
//! - [`SegmentedSequence`] - a chain of blocks; growth appends, existing data never moves
//!
//! The crate intentionally:
//! - does NOT synchronize (single owner, single thread)
//! - does NOT grow implicitly
//! - does NOT do I/O or serialization
//!
//! # Buffer
//!
//! ```
//! use poolbuf::{ArrayPool, GrowableBuffer};
//!
//! let pool = ArrayPool::<u8>::new();
//! let mut buf = GrowableBuffer::new_in(16, &pool);
//! buf.extend_from_slice(b"header")?;
//! buf.ensure_capacity(4096)?;
//! assert!(buf.capacity() >= 4096);
//! assert_eq!(buf.data_span(), b"header");
//!
//! buf.dispose();
//! assert_eq!(pool.stats().outstanding(), 0);
//! # Ok::<(), poolbuf::BufferError>(())
//! ```
//!
//! # Sequence
//!
//! ```
//! use poolbuf::SegmentedSequence;
//!
//! let mut seq = SegmentedSequence::<u8>::new(1)?;
//! seq.grow(5)?;
//!
//! for span in &seq {
//!     assert!(!span.is_empty());
//! }
//! # Ok::<(), poolbuf::BufferError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;
mod pool;
mod sequence;

//
// Public surface
//

pub use buffer::GrowableBuffer;
pub use config::{
    DEFAULT_MAX_BLOCK_LEN, DEFAULT_MAX_BLOCKS_PER_BUCKET, DEFAULT_MIN_BLOCK_LEN, PoolConfig,
};
pub use error::{BufferError, Result};
pub use pool::{ArrayPool, Block, BlockPool, PoolStats};
pub use sequence::{SegmentedSequence, Segments, SegmentsMut};
