#![no_main]

use libfuzzer_sys::fuzz_target;
use poolbuf::{ArrayPool, GrowableBuffer, PoolConfig};

fuzz_target!(|data: Vec<u8>| {
    let pool = ArrayPool::<u8>::with_config(PoolConfig::new(4, 4096, 2).unwrap()).unwrap();
    let mut buf = GrowableBuffer::<u8, _>::new_in(0, &pool);

    // Input is a list of (opcode, argument) pairs
    for op in data.chunks(2) {
        let arg = op.get(1).copied().unwrap_or(0) as usize;
        let capacity_before = buf.capacity();
        let snapshot = buf.full_span().to_vec();

        match op[0] % 4 {
            0 => buf.grow(arg).unwrap(),
            1 => buf.ensure_capacity(arg * 8).unwrap(),
            2 => buf.extend_from_slice(&data[..arg.min(data.len())]).unwrap(),
            _ => {
                let ok = buf.set_len(arg).is_ok();
                assert_eq!(ok, arg <= buf.capacity());
            }
        }

        // Verify: capacity never shrinks
        assert!(buf.capacity() >= capacity_before);
        assert!(buf.len() <= buf.capacity());

        // Verify: growth carries every old element across
        if op[0] % 4 < 2 {
            assert_eq!(&buf.full_span()[..snapshot.len()], &snapshot[..]);
        }
    }

    drop(buf);
    assert_eq!(pool.stats().outstanding(), 0);
});
