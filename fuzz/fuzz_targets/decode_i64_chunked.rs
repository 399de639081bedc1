#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use prim_codec::{read_int, ByteChunks, StrictChunks};

fuzz_target!(|data: &[u8]| {
    // The first byte picks a chunk length; the result must not depend on it.
    let Some((&n, data)) = data.split_first() else {
        return;
    };
    let n = usize::from(n.max(1));
    let whole = read_int::<i64, _>(StrictChunks::from(data)).map(|(v, r)| (v, r.to_bytes()));
    let chunks = ByteChunks::from_chunks(data.chunks(n).map(Bytes::copy_from_slice).collect());
    let split = read_int::<i64, _>(chunks).map(|(v, r)| (v, r.to_bytes()));
    assert_eq!(whole, split);
});
