#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{decode_with_opts, from_bytes, to_bytes, DeOpts};

fuzz_target!(|data: &[u8]| {
    let decoded = decode_with_opts(data, DeOpts::new().max_seq_len(100));
    if let Ok(decoded) = decoded {
        // Anything we can read we must be able to write back, and the written
        // form must be stable.
        let bs = to_bytes(&decoded.node).unwrap();
        let again = to_bytes(&from_bytes(&bs).unwrap()).unwrap();
        assert_eq!(bs, again);
    }
});
