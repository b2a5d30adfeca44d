//! Contiguous pool-backed buffer.
//!
//! [`GrowableBuffer`] owns exactly one pooled block at a time. Growth rents a
//! larger block, moves the contents across and releases the old one, so it
//! costs O(capacity) per call.

mod growable;

pub use growable::GrowableBuffer;
