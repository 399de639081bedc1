//! Traits that run primitives against `bytes::BufMut` and decode decimal literals from
//! `bytes::Buf`.

use crate::decimal::{scan_buf, sign_prefix, DecimalInt, IntAccumulator};
use crate::integer::LimbAccumulator;
use crate::{BoundedPrim, Cursor, FixedPrim};

use bytes::{Buf, BufMut};
use num_bigint::{BigInt, BigUint, Sign};

/// Bounds up to this size are staged on the stack when the destination chunk is too short.
const SCRATCH_LEN: usize = 64;

/// Writes `bound` bytes worth of primitive output to `buf`, returning the number of bytes kept.
fn put_with<B, W>(buf: &mut B, bound: usize, write: W) -> usize
where
    B: BufMut + ?Sized,
    W: FnOnce(&mut Cursor<'_>) -> usize,
{
    let chunk = buf.chunk_mut();
    if bound <= SCRATCH_LEN && chunk.len() >= bound {
        chunk[..bound].copy_from_slice(&[0u8; SCRATCH_LEN][..bound]);
        // SAFETY: the first `bound` bytes of the chunk were initialized just above.
        let dst = unsafe { std::slice::from_raw_parts_mut(chunk.as_mut_ptr(), bound) };
        let len = write(&mut Cursor::new(dst));
        // SAFETY: `len <= bound` bytes of the chunk now hold the encoded value.
        unsafe { buf.advance_mut(len) };
        len
    } else if bound <= SCRATCH_LEN {
        let mut scratch = [0u8; SCRATCH_LEN];
        let len = write(&mut Cursor::new(&mut scratch[..bound]));
        buf.put_slice(&scratch[..len]);
        len
    } else {
        let mut scratch = vec![0u8; bound];
        let len = write(&mut Cursor::new(&mut scratch));
        buf.put_slice(&scratch[..len]);
        len
    }
}

/// Extension for `bytes::BufMut` to write the output of encoding primitives.
///
/// ```
/// use prim_codec::{bounded, fixed, PrimBufMut};
///
/// let mut out = Vec::new();
/// out.put_fixed(&fixed::u16_be(), 0xcafe);
/// out.put_bounded(&bounded::dec_u32(), 42);
/// assert_eq!(out, b"\xca\xfe42");
/// ```
pub trait PrimBufMut {
    /// Writes `value` with a fixed primitive; always advances by `p.size()`.
    fn put_fixed<A, F>(&mut self, p: &FixedPrim<A, F>, value: A)
    where
        F: Fn(A, &mut Cursor<'_>);

    /// Writes `value` with a bounded primitive and returns the number of bytes written.
    fn put_bounded<A, F>(&mut self, p: &BoundedPrim<A, F>, value: A) -> usize
    where
        F: Fn(A, &mut Cursor<'_>);
}

impl<Inner: BufMut> PrimBufMut for Inner {
    #[inline]
    fn put_fixed<A, F>(&mut self, p: &FixedPrim<A, F>, value: A)
    where
        F: Fn(A, &mut Cursor<'_>),
    {
        put_with(self, p.size(), |c| {
            p.write(value, c);
            c.written()
        });
    }

    #[inline]
    fn put_bounded<A, F>(&mut self, p: &BoundedPrim<A, F>, value: A) -> usize
    where
        F: Fn(A, &mut Cursor<'_>),
    {
        put_with(self, p.size_bound(), |c| p.write(value, c))
    }
}

/// Reads the sign of a literal at the front of `buf` and advances past it.
fn get_sign<B: Buf + ?Sized>(buf: &mut B, allow_negative: bool) -> Option<bool> {
    if !buf.has_remaining() {
        return None;
    }
    let (positive, skip) = sign_prefix(buf.chunk()[0])?;
    if !positive && !allow_negative {
        return None;
    }
    buf.advance(skip);
    Some(positive)
}

/// Extension for `bytes::Buf` to decode ASCII decimal literals.
///
/// Decoding stops in front of the first byte that is not a digit. A literal may span any number
/// of chunks, which makes these usable with `bytes::buf::Chain`.
///
/// On failure the buffer is left advanced past the sign and any digits consumed before the
/// failure was detected. A buffer that does not start with a sign or digit is not advanced.
///
/// ```
/// use bytes::Buf;
/// use prim_codec::DecimalBuf;
///
/// let mut buf = (&b"12,-3"[..]).chain(&b"4 "[..]);
/// assert_eq!(buf.get_decimal::<i32>(), Some(12));
/// buf.advance(1);
/// assert_eq!(buf.get_decimal::<i32>(), Some(-34));
/// assert_eq!(buf.remaining(), 1);
/// ```
pub trait DecimalBuf {
    /// Reads a machine integer. Returns `None` for a missing literal or one out of range for `T`.
    fn get_decimal<T: DecimalInt>(&mut self) -> Option<T>;

    /// Like `get_decimal()`, but fails once the literal would have more than `max_digits` digits.
    fn get_decimal_limited<T: DecimalInt>(&mut self, max_digits: usize) -> Option<T>;

    /// Reads an arbitrarily large integer.
    fn get_integer(&mut self) -> Option<BigInt>;

    /// Like `get_integer()`, but fails once the literal would have more than `max_digits` digits.
    fn get_integer_limited(&mut self, max_digits: usize) -> Option<BigInt>;

    /// Reads an arbitrarily large natural number; a leading `-` is rejected.
    fn get_natural(&mut self) -> Option<BigUint>;

    /// Like `get_natural()`, but fails once the literal would have more than `max_digits` digits.
    fn get_natural_limited(&mut self, max_digits: usize) -> Option<BigUint>;
}

impl<Inner: Buf> DecimalBuf for Inner {
    #[inline]
    fn get_decimal<T: DecimalInt>(&mut self) -> Option<T> {
        self.get_decimal_limited(usize::MAX)
    }

    fn get_decimal_limited<T: DecimalInt>(&mut self, max_digits: usize) -> Option<T> {
        let positive = get_sign(self, T::SIGNED)?;
        let mut acc = IntAccumulator::new(T::magnitude_limit(positive), max_digits);
        if !scan_buf(&mut acc, self) {
            return None;
        }
        Some(T::from_magnitude(acc.finish()?, positive))
    }

    #[inline]
    fn get_integer(&mut self) -> Option<BigInt> {
        self.get_integer_limited(usize::MAX)
    }

    fn get_integer_limited(&mut self, max_digits: usize) -> Option<BigInt> {
        let positive = get_sign(self, true)?;
        let mut acc = LimbAccumulator::new(max_digits);
        if !scan_buf(&mut acc, self) {
            return None;
        }
        let sign = if positive { Sign::Plus } else { Sign::Minus };
        Some(BigInt::from_biguint(sign, acc.finish()?))
    }

    #[inline]
    fn get_natural(&mut self) -> Option<BigUint> {
        self.get_natural_limited(usize::MAX)
    }

    fn get_natural_limited(&mut self, max_digits: usize) -> Option<BigUint> {
        get_sign(self, false)?;
        let mut acc = LimbAccumulator::new(max_digits);
        if !scan_buf(&mut acc, self) {
            return None;
        }
        acc.finish()
    }
}
