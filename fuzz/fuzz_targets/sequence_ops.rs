#![no_main]

use libfuzzer_sys::fuzz_target;
use poolbuf::{ArrayPool, PoolConfig, SegmentedSequence};

fuzz_target!(|data: Vec<u8>| {
    let pool = ArrayPool::<u8>::with_config(PoolConfig::new(4, 256, 2).unwrap()).unwrap();
    let Some((&first, rest)) = data.split_first() else {
        return;
    };

    let Ok(mut seq) = SegmentedSequence::<u8, _>::new_in(first as usize, &pool) else {
        assert_eq!(first, 0);
        return;
    };

    for &size in rest {
        let before = seq.length();
        match seq.grow(size as usize) {
            Ok(()) => assert!(seq.length() >= before + size as u64),
            Err(_) => {
                assert_eq!(size, 0);
                assert_eq!(seq.length(), before);
            }
        }
    }

    // Verify: segment boundaries map back to their own segment
    let length = seq.length();
    let mut running_index = 0u64;
    for span in seq.segments() {
        for index in [running_index, running_index + span.len() as u64 - 1] {
            let found = seq.get_span(index).unwrap();
            assert_eq!(found.as_ptr(), span.as_ptr());
            let (_, offset) = seq.locate(index).unwrap();
            assert_eq!(offset as u64, index - running_index);
        }
        running_index += span.len() as u64;
    }
    assert_eq!(running_index, length);
    assert!(seq.get_span(length).is_err());

    seq.dispose();
    assert_eq!(pool.stats().outstanding(), 0);
});
