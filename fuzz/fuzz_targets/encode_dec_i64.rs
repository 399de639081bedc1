#![no_main]

use libfuzzer_sys::fuzz_target;
use prim_codec::{bounded, encode_bounded, read_int, StrictChunks};

fuzz_target!(|data: &[u8]| {
    let p = bounded::dec_i64();
    for chunk in data.chunks_exact(8) {
        let mut buf = [0; 8];
        buf.copy_from_slice(chunk);
        let n = i64::from_le_bytes(buf);
        let encoded = encode_bounded(&p, n);
        assert!(encoded.len() <= p.size_bound());
        let (v, mut rest) = read_int::<i64, _>(StrictChunks::from(encoded)).unwrap();
        assert_eq!(v, n);
        assert!(rest.is_empty());
    }
});
