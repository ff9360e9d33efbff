#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::error::ErrorKind;
use nbtree::{from_bytes, to_bytes, Node};

fuzz_target!(|node: Node| {
    let bs = match to_bytes(&node) {
        Ok(bs) => bs,
        Err(_) => return,
    };

    let decoded = match from_bytes(&bs) {
        Ok(decoded) => decoded,
        Err(e) if matches!(e.kind(), ErrorKind::DepthLimit(_)) => return,
        Err(e) => panic!("encoder output failed to decode: {}", e),
    };

    assert_eq!(to_bytes(&decoded).unwrap(), bs);
});
