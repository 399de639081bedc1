#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigInt;
use prim_codec::{read_integer, StrictChunks};

fuzz_target!(|data: &[u8]| {
    if let Some((v, rest)) = read_integer(StrictChunks::from(data)) {
        let rest = rest.to_bytes();
        let literal = &data[..data.len() - rest.len()];
        let text = std::str::from_utf8(literal).unwrap();
        assert_eq!(text.parse::<BigInt>().unwrap(), v);
    }
});
