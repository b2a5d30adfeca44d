// Integration tests for GrowableBuffer
// Tests cover: construction, copying growth, capacity checks, release accounting

mod common;

use common::{CountingPool, init_tracing};
use poolbuf::{ArrayPool, GrowableBuffer, PoolConfig};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_meets_min_capacity() {
    for min in [0usize, 1, 7, 64, 1000] {
        let pool = CountingPool::<u8>::new();
        let buf = GrowableBuffer::<u8, _>::new_in(min, &pool);
        assert!(buf.capacity() >= min, "capacity below request for {}", min);
        assert_eq!(buf.len(), 0);
    }
}

#[test]
fn test_from_slice_sets_length() {
    let pool = CountingPool::<u16>::with_slack(3);
    let buf = GrowableBuffer::<u16, _>::from_slice_in(&[10, 20, 30], &pool);

    assert_eq!(buf.len(), 3);
    assert_eq!(buf.capacity(), 6);
    assert_eq!(buf.data_span(), &[10, 20, 30]);
    assert_eq!(&buf.full_span()[3..], &[0, 0, 0]);
}

#[test]
fn test_from_empty_slice() {
    let buf = GrowableBuffer::<u8>::from_slice(&[]);
    assert!(buf.is_empty());
    assert!(buf.data_span().is_empty());
}

// ============================================================================
// Growth
// ============================================================================

#[test]
fn test_grow_end_to_end() {
    init_tracing();
    let mut buf = GrowableBuffer::<i32>::new(1);
    buf.grow(5).unwrap();
    assert!(buf.capacity() >= 6);
}

#[test]
fn test_grow_preserves_all_elements() {
    let pool = CountingPool::<u8>::with_slack(2);
    let mut buf = GrowableBuffer::<u8, _>::new_in(4, &pool);
    buf.extend_from_slice(&[1, 2]).unwrap();
    // write past the valid area too; growth must carry it over
    buf[5] = 9;
    let before = buf.full_span().to_vec();

    buf.grow(10).unwrap();

    assert!(buf.capacity() >= before.len() + 10);
    assert_eq!(&buf.full_span()[..before.len()], &before[..]);
    assert_eq!(buf.data_span(), &[1, 2]);
}

#[test]
fn test_grow_zero_still_replaces_block() {
    let pool = CountingPool::<u8>::new();
    let mut buf = GrowableBuffer::<u8, _>::new_in(8, &pool);
    buf.grow(0).unwrap();

    assert_eq!(buf.capacity(), 8);
    assert_eq!(pool.rents(), 2);
    assert_eq!(pool.releases(), 1);
}

#[test]
fn test_grow_rejects_overflow_without_mutation() {
    let pool = CountingPool::<u8>::new();
    let mut buf = GrowableBuffer::<u8, _>::new_in(8, &pool);
    buf.set_len(3).unwrap();

    let err = buf.grow(usize::MAX).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("by_at_least"));

    assert_eq!(buf.capacity(), 8);
    assert_eq!(buf.len(), 3);
    assert_eq!(pool.rents(), 1);
    assert_eq!(pool.releases(), 0);
}

#[test]
fn test_ensure_capacity() {
    let mut buf = GrowableBuffer::<i32>::new(1);
    let min_capacity = 6;

    buf.ensure_capacity(min_capacity).unwrap();

    assert!(buf.capacity() >= min_capacity);
}

#[test]
fn test_ensure_capacity_is_idempotent() {
    let pool = CountingPool::<u8>::new();
    let mut buf = GrowableBuffer::<u8, _>::new_in(2, &pool);

    buf.ensure_capacity(50).unwrap();
    let once = buf.capacity();
    buf.ensure_capacity(50).unwrap();

    assert_eq!(buf.capacity(), once);
    assert_eq!(pool.rents(), 2, "second call must not touch the pool");
}

#[test]
fn test_ensure_capacity_grows_by_exact_shortfall() {
    let pool = CountingPool::<u8>::new();
    let mut buf = GrowableBuffer::<u8, _>::new_in(10, &pool);
    buf.ensure_capacity(25).unwrap();
    assert_eq!(buf.capacity(), 25);
}

#[test]
fn test_capacity_never_shrinks() {
    let pool = ArrayPool::<u64>::with_config(PoolConfig::new(4, 256, 2).unwrap()).unwrap();
    let mut buf = GrowableBuffer::<u64, _>::new_in(4, &pool);
    let mut last = buf.capacity();
    for step in [0usize, 3, 1, 100, 0, 500] {
        buf.grow(step).unwrap();
        assert!(buf.capacity() >= last + step);
        last = buf.capacity();
    }
}

// ============================================================================
// Length and access
// ============================================================================

#[test]
fn test_set_len_bounds() {
    let pool = CountingPool::<u8>::new();
    let mut buf = GrowableBuffer::<u8, _>::new_in(4, &pool);

    buf.set_len(4).unwrap();
    assert_eq!(buf.data_span().len(), 4);

    assert!(buf.set_len(5).unwrap_err().is_invalid_argument());
    assert_eq!(buf.len(), 4);
}

#[test]
fn test_data_span_mut_edits_valid_area() {
    let mut buf = GrowableBuffer::<u8>::from_slice(b"abc");
    buf.data_span_mut()[1] = b'X';
    assert_eq!(buf.data_span(), b"aXc");
    assert_eq!(buf.to_bytes(), bytes::Bytes::from_static(b"aXc"));
}

#[test]
fn test_range_access() {
    let pool = CountingPool::<u8>::new();
    let mut buf = GrowableBuffer::<u8, _>::new_in(8, &pool);
    buf[2..5].copy_from_slice(b"xyz");
    assert_eq!(&buf[2..5], b"xyz");
    assert_eq!(buf[..].len(), 8);
}

#[test]
#[should_panic]
fn test_range_past_capacity_panics() {
    let pool = CountingPool::<u8>::new();
    let buf = GrowableBuffer::<u8, _>::new_in(8, &pool);
    let _slice: &[u8] = &buf[4..9];
}

// ============================================================================
// Release accounting
// ============================================================================

#[test]
fn test_dispose_balances_rents() {
    let pool = CountingPool::<u8>::with_slack(1);
    let mut buf = GrowableBuffer::<u8, _>::new_in(1, &pool);
    buf.grow(5).unwrap();
    buf.ensure_capacity(100).unwrap();
    buf.extend_from_slice(&[7; 200]).unwrap();

    buf.dispose();

    assert_eq!(pool.releases(), pool.rents());
    assert_eq!(pool.live_blocks(), 0);
}

#[test]
fn test_drop_releases_like_dispose() {
    let pool = CountingPool::<u8>::new();
    {
        let mut buf = GrowableBuffer::<u8, _>::new_in(3, &pool);
        buf.grow(3).unwrap();
    }
    assert_eq!(pool.releases(), pool.rents());
}

#[test]
fn test_clear_requested_only_for_owning_types() {
    let plain = CountingPool::<u32>::new();
    GrowableBuffer::<u32, _>::new_in(4, &plain).dispose();
    assert_eq!(plain.clears(), 0);

    let owning = CountingPool::<String>::new();
    let mut buf = GrowableBuffer::<String, _>::new_in(1, &owning);
    buf.grow(1).unwrap();
    buf.dispose();
    assert_eq!(owning.clears(), 2);
}

#[test]
fn test_shared_pool_reuses_blocks() {
    let pool = ArrayPool::<u8>::new();
    GrowableBuffer::<u8, _>::new_in(100, &pool).dispose();
    let buf = GrowableBuffer::<u8, _>::new_in(100, &pool);

    assert_eq!(pool.stats().reused, 1);
    drop(buf);
    assert_eq!(pool.stats().outstanding(), 0);
}
