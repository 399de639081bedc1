use bytes::{Buf, Bytes};
use num_bigint::BigInt;
use prim_codec::{
    bounded, encode_bounded_iter, fixed, read_int, read_integer, ByteChunks, DecimalBuf,
    PrimBufMut,
};

#[test]
fn decimal_lines_round_trip() {
    let values = [0i64, -1, 1, i64::MIN, i64::MAX, -1729, 4_000_000_000];
    let line = bounded::dec_i64().pair(fixed::u8().to_bounded());
    let encoded = encode_bounded_iter(&line, values.iter().map(|v| (*v, b'\n')));

    let mut rest = ByteChunks::from_chunks(
        encoded
            .chunks(5)
            .map(Bytes::copy_from_slice)
            .collect::<Vec<_>>(),
    );
    let mut decoded = Vec::new();
    while let Some((v, tail)) = read_int::<i64, _>(rest.clone()) {
        decoded.push(v);
        rest = tail.drop_prefix(1);
    }
    assert_eq!(decoded, values);
    assert!(rest.is_empty());
}

#[test]
fn sign_at_end_of_chunk() {
    let chunks = ByteChunks::from_chunks(vec![Bytes::from_static(b"-"), Bytes::from_static(b"5")]);
    assert_eq!(read_int::<i8, _>(chunks).map(|(v, _)| v), Some(-5));

    let chunks = ByteChunks::from_chunks(vec![Bytes::from_static(b"-"), Bytes::from_static(b"x")]);
    assert!(read_int::<i8, _>(chunks).is_none());
}

#[test]
fn overflow_detected_in_later_chunk() {
    let chunks = ByteChunks::from_chunks(vec![
        Bytes::from_static(b"922337203"),
        Bytes::from_static(b"6854775807"),
        Bytes::from_static(b"0"),
    ]);
    assert!(read_int::<i64, _>(chunks).is_none());
}

#[test]
fn integer_wider_than_any_machine_word() {
    let digits = "98765432109876543210".repeat(20);
    let chunks = ByteChunks::from_chunks(
        digits
            .as_bytes()
            .chunks(7)
            .map(Bytes::copy_from_slice)
            .collect::<Vec<_>>(),
    );
    let (v, mut rest) = read_integer(chunks).unwrap();
    assert_eq!(v, digits.parse::<BigInt>().unwrap());
    assert!(rest.is_empty());
}

#[test]
fn buf_mut_and_buf_agree() {
    let mut out = Vec::new();
    for v in [u32::MAX, 0, 17] {
        out.put_bounded(&bounded::dec_u32(), v);
        out.put_fixed(&fixed::char8(), ' ');
    }
    let mut buf = out.as_slice();
    let mut decoded = Vec::new();
    while let Some(v) = buf.get_decimal::<u32>() {
        decoded.push(v);
        buf.advance(1);
    }
    assert_eq!(decoded, [u32::MAX, 0, 17]);
}
