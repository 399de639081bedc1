#![no_main]

use libfuzzer_sys::fuzz_target;
use prim_codec::{bounded, PrimBufMut};

fuzz_target!(|data: &[u8]| {
    let p = bounded::prefix_varint_u64();
    let mut dst: Vec<u8> = Vec::new();
    for chunk in data.chunks_exact(8) {
        let mut buf = [0; 8];
        buf.copy_from_slice(chunk);
        let n = u64::from_le_bytes(buf);
        let len = dst.put_bounded(&p, n);
        assert!((1..=p.size_bound()).contains(&len));
    }
});
