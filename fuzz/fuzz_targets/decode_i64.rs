#![no_main]

use libfuzzer_sys::fuzz_target;
use prim_codec::{read_int, StrictChunks};

fuzz_target!(|data: &[u8]| {
    // Any input may be rejected, but an accepted literal must agree with str::parse().
    if let Some((v, rest)) = read_int::<i64, _>(StrictChunks::from(data)) {
        let rest = rest.to_bytes();
        let literal = &data[..data.len() - rest.len()];
        let text = std::str::from_utf8(literal).unwrap();
        assert_eq!(text.parse::<i64>().unwrap(), v);
    }
});
