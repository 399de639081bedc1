//! Streaming ASCII decimal integer decoding over chunked input.
//!
//! A literal is an optional `+` or `-` followed by one or more digits `0`-`9`. Decoding stops at
//! the first byte that is not a digit, which is left unconsumed, so the input never has to be
//! resident in one piece and nothing past the literal is examined except that one byte.
//!
//! ```
//! use prim_codec::{read_int, ByteChunks};
//!
//! let (v, rest) = read_int::<i64, _>(ByteChunks::from_static(b"-1729 apples")).unwrap();
//! assert_eq!(v, -1729);
//! assert_eq!(&rest.to_bytes()[..], b" apples");
//!
//! assert!(read_int::<i64, _>(ByteChunks::from_static(b"12345678901234567890")).is_none());
//! ```

use bytes::{Buf, Bytes};
use num_traits::{PrimInt, Unsigned};
use tracing::trace;

use crate::ByteChunks;

/// Integer types that can be decoded from ASCII decimal.
///
/// Signed types accept a leading `+` or `-`. Unsigned types accept a leading `+` but reject `-`,
/// including `-0`.
pub trait DecimalInt: Sized + Copy {
    /// Unsigned type wide enough to hold the magnitude of every value, including `|MIN|`.
    type Magnitude: PrimInt + Unsigned + From<u8>;

    /// Whether a leading `-` may be accepted.
    const SIGNED: bool;

    /// Largest magnitude a literal with the given sign may reach.
    fn magnitude_limit(positive: bool) -> Self::Magnitude;

    /// Builds the value from a magnitude no larger than `magnitude_limit(positive)`.
    fn from_magnitude(magnitude: Self::Magnitude, positive: bool) -> Self;
}

macro_rules! impl_signed {
    ($($int:ty => $uint:ty;)*) => {
        $(
            impl DecimalInt for $int {
                type Magnitude = $uint;
                const SIGNED: bool = true;

                #[inline]
                fn magnitude_limit(positive: bool) -> $uint {
                    if positive {
                        <$int>::MAX as $uint
                    } else {
                        <$int>::MIN.unsigned_abs()
                    }
                }

                #[inline]
                fn from_magnitude(magnitude: $uint, positive: bool) -> Self {
                    if positive {
                        magnitude as $int
                    } else {
                        // Two's complement: negating |MIN| in the unsigned type wraps back to the
                        // bit pattern of MIN, which a signed negation could not produce.
                        magnitude.wrapping_neg() as $int
                    }
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($uint:ty;)*) => {
        $(
            impl DecimalInt for $uint {
                type Magnitude = $uint;
                const SIGNED: bool = false;

                #[inline]
                fn magnitude_limit(_positive: bool) -> $uint {
                    <$uint>::MAX
                }

                #[inline]
                fn from_magnitude(magnitude: $uint, _positive: bool) -> Self {
                    magnitude
                }
            }
        )*
    };
}

impl_signed! {
    i8 => u8;
    i16 => u16;
    i32 => u32;
    i64 => u64;
    i128 => u128;
    isize => usize;
}

impl_unsigned! {
    u8;
    u16;
    u32;
    u64;
    u128;
    usize;
}

/// Interprets the first byte of a literal. Returns whether the literal is positive and how many
/// bytes the sign occupies, or `None` if `b` cannot start a literal.
#[inline]
pub(crate) fn sign_prefix(b: u8) -> Option<(bool, usize)> {
    match b {
        b'+' => Some((true, 1)),
        b'-' => Some((false, 1)),
        b'0'..=b'9' => Some((true, 0)),
        _ => None,
    }
}

/// Why a scan over one chunk stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Feed {
    /// Every byte was a digit; the literal may continue in the next chunk.
    Exhausted,
    /// A non-digit byte ended the literal.
    Terminated,
    /// The next digit would overflow the target type.
    Overflow,
    /// The next digit would exceed the caller's digit limit.
    Limit,
}

/// Digit accumulator driven chunk by chunk.
pub(crate) trait DigitScan {
    /// Folds the leading digits of `chunk` into the accumulator. Returns how many bytes were
    /// consumed and why scanning stopped.
    fn feed(&mut self, chunk: &[u8]) -> (usize, Feed);
}

/// Fixed width magnitude accumulator with overflow detection ahead of every multiply.
pub(crate) struct IntAccumulator<M> {
    magnitude: M,
    max_quot: M,
    max_rem: M,
    digits: usize,
    max_digits: usize,
}

impl<M: PrimInt + Unsigned + From<u8>> IntAccumulator<M> {
    pub(crate) fn new(limit: M, max_digits: usize) -> Self {
        let ten = <M as From<u8>>::from(10);
        Self {
            magnitude: M::zero(),
            max_quot: limit / ten,
            max_rem: limit % ten,
            digits: 0,
            max_digits,
        }
    }

    /// Returns the accumulated magnitude, or `None` if no digit was consumed.
    pub(crate) fn finish(self) -> Option<M> {
        (self.digits > 0).then_some(self.magnitude)
    }
}

impl<M: PrimInt + Unsigned + From<u8>> DigitScan for IntAccumulator<M> {
    #[inline]
    fn feed(&mut self, chunk: &[u8]) -> (usize, Feed) {
        let ten = <M as From<u8>>::from(10);
        for (i, &b) in chunk.iter().enumerate() {
            let d = b.wrapping_sub(b'0');
            if d > 9 {
                return (i, Feed::Terminated);
            }
            let d = <M as From<u8>>::from(d);
            if self.magnitude > self.max_quot
                || (self.magnitude == self.max_quot && d > self.max_rem)
            {
                return (i, Feed::Overflow);
            }
            if self.digits == self.max_digits {
                return (i, Feed::Limit);
            }
            self.magnitude = self.magnitude * ten + d;
            self.digits += 1;
        }
        (chunk.len(), Feed::Exhausted)
    }
}

/// Walks `chunk` and then the chunks of `rest` through `scan` until the literal ends. Returns the
/// unconsumed remainder, or `None` if the scan overflowed or hit its digit limit.
pub(crate) fn scan_chunks<S, I>(
    scan: &mut S,
    mut chunk: Bytes,
    mut rest: ByteChunks<I>,
) -> Option<ByteChunks<I>>
where
    S: DigitScan,
    I: Iterator<Item = Bytes>,
{
    loop {
        let (used, feed) = scan.feed(&chunk);
        match feed {
            Feed::Exhausted => match rest.next() {
                Some(next) => chunk = next,
                None => return Some(rest),
            },
            Feed::Terminated => return Some(rest.push_front(chunk.slice(used..))),
            Feed::Overflow | Feed::Limit => {
                trace_rejection(feed);
                return None;
            }
        }
    }
}

#[cold]
fn trace_rejection(feed: Feed) {
    match feed {
        Feed::Overflow => trace!("decimal literal overflows target width"),
        Feed::Limit => trace!("decimal literal exceeds digit limit"),
        Feed::Exhausted | Feed::Terminated => {}
    }
}

/// `Buf` flavour of `scan_chunks()`. Advances `buf` past every consumed digit. Returns false if
/// the scan overflowed or hit its digit limit.
pub(crate) fn scan_buf<S, B>(scan: &mut S, buf: &mut B) -> bool
where
    S: DigitScan,
    B: Buf + ?Sized,
{
    while buf.has_remaining() {
        let (used, feed) = scan.feed(buf.chunk());
        buf.advance(used);
        match feed {
            Feed::Exhausted => {}
            Feed::Terminated => return true,
            Feed::Overflow | Feed::Limit => {
                trace_rejection(feed);
                return false;
            }
        }
    }
    true
}

/// Decodes a decimal integer from the front of `input`, returning it along with the unconsumed
/// remainder.
///
/// Returns `None` if `input` does not start with a sign or digit, if a sign is not followed by a
/// digit, or if the literal is out of range for `T`; these cases are not distinguished.
///
/// Leading zeros are consumed without bound: an endless run of `0` bytes never terminates. Use
/// `read_int_limited()` when the input may be infinite.
pub fn read_int<T, I>(input: ByteChunks<I>) -> Option<(T, ByteChunks<I>)>
where
    T: DecimalInt,
    I: Iterator<Item = Bytes>,
{
    read_int_limited(input, usize::MAX)
}

/// Like `read_int()`, but fails once the literal would have more than `max_digits` digits,
/// leading zeros included.
pub fn read_int_limited<T, I>(
    input: ByteChunks<I>,
    max_digits: usize,
) -> Option<(T, ByteChunks<I>)>
where
    T: DecimalInt,
    I: Iterator<Item = Bytes>,
{
    let (chunk, rest) = input.first_chunk()?;
    let (positive, skip) = sign_prefix(chunk[0])?;
    if !positive && !T::SIGNED {
        return None;
    }
    let mut acc = IntAccumulator::new(T::magnitude_limit(positive), max_digits);
    let rest = scan_chunks(&mut acc, chunk.slice(skip..), rest)?;
    let Some(magnitude) = acc.finish() else {
        trace!("sign without digits");
        return None;
    };
    Some((T::from_magnitude(magnitude, positive), rest))
}
