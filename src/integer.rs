//! Streaming decoding of arbitrarily long decimal literals.
//!
//! Digits are gathered into limbs of `LIMB_DIGITS` digits, each small enough for native
//! arithmetic. Once the literal ends the limbs are merged pairwise, squaring the limb base on
//! every pass, so the bulk of the work is a logarithmic number of large multiplications rather
//! than one multiplication by `10^9` per limb.
//!
//! ```
//! use num_bigint::BigInt;
//! use prim_codec::{read_integer, ByteChunks};
//!
//! let input = ByteChunks::from_static(b"-1234567890123456789012345,");
//! let (v, rest) = read_integer(input).unwrap();
//! assert_eq!(v, "-1234567890123456789012345".parse::<BigInt>().unwrap());
//! assert_eq!(&rest.to_bytes()[..], b",");
//! ```

use bytes::Bytes;
use num_bigint::{BigInt, BigUint, Sign};
use tracing::trace;

use crate::decimal::{scan_chunks, sign_prefix, DigitScan, Feed};
use crate::{ByteChunks, LIMB_DIGITS};

const LIMB_BASE: u32 = 10u32.pow(LIMB_DIGITS);

/// Collects decimal digits into base `10^9` limbs.
pub(crate) struct LimbAccumulator {
    // Completed limbs in the order they were read, so the most recent is last.
    limbs: Vec<u32>,
    // The limb being filled. u64 leaves headroom for the multiply-add.
    current: u64,
    current_digits: u32,
    digits: usize,
    max_digits: usize,
}

impl LimbAccumulator {
    pub(crate) fn new(max_digits: usize) -> Self {
        Self {
            limbs: Vec::new(),
            current: 0,
            current_digits: 0,
            digits: 0,
            max_digits,
        }
    }

    /// Returns the accumulated magnitude, or `None` if no digit was consumed.
    pub(crate) fn finish(self) -> Option<BigUint> {
        if self.digits == 0 {
            return None;
        }
        let low = BigUint::from(self.current);
        if self.limbs.is_empty() {
            return Some(low);
        }
        let limbs = self.limbs.into_iter().rev().map(BigUint::from).collect();
        let high = combine(limbs, BigUint::from(LIMB_BASE));
        Some(high * 10u32.pow(self.current_digits) + low)
    }
}

impl DigitScan for LimbAccumulator {
    #[inline]
    fn feed(&mut self, chunk: &[u8]) -> (usize, Feed) {
        for (i, &b) in chunk.iter().enumerate() {
            let d = b.wrapping_sub(b'0');
            if d > 9 {
                return (i, Feed::Terminated);
            }
            if self.digits == self.max_digits {
                return (i, Feed::Limit);
            }
            self.current = self.current * 10 + u64::from(d);
            self.current_digits += 1;
            self.digits += 1;
            if self.current_digits == LIMB_DIGITS {
                self.limbs.push(self.current as u32);
                self.current = 0;
                self.current_digits = 0;
            }
        }
        (chunk.len(), Feed::Exhausted)
    }
}

/// Merges limbs given least significant first, where each limb is worth `base` times the one
/// before it.
fn combine(mut limbs: Vec<BigUint>, mut base: BigUint) -> BigUint {
    while limbs.len() > 1 {
        let mut merged = Vec::with_capacity((limbs.len() + 1) / 2);
        let mut iter = limbs.into_iter();
        while let Some(lo) = iter.next() {
            merged.push(match iter.next() {
                Some(hi) => hi * &base + lo,
                None => lo,
            });
        }
        limbs = merged;
        if limbs.len() > 1 {
            base = &base * &base;
        }
    }
    limbs.pop().unwrap_or_default()
}

/// Parses the magnitude of a literal starting at `input`, after an optional sign.
fn read_magnitude<I>(
    input: ByteChunks<I>,
    max_digits: usize,
    allow_negative: bool,
) -> Option<(BigUint, bool, ByteChunks<I>)>
where
    I: Iterator<Item = Bytes>,
{
    let (chunk, rest) = input.first_chunk()?;
    let (positive, skip) = sign_prefix(chunk[0])?;
    if !positive && !allow_negative {
        return None;
    }
    let mut acc = LimbAccumulator::new(max_digits);
    let rest = scan_chunks(&mut acc, chunk.slice(skip..), rest)?;
    let Some(magnitude) = acc.finish() else {
        trace!("sign without digits");
        return None;
    };
    Some((magnitude, positive, rest))
}

/// Decodes an arbitrarily large decimal integer from the front of `input`, returning it along
/// with the unconsumed remainder.
///
/// Returns `None` if `input` does not start with a sign or digit or if a sign is not followed by
/// a digit. Like `read_int()` this consumes an endless run of digits without end; use
/// `read_integer_limited()` when the input may be infinite.
pub fn read_integer<I>(input: ByteChunks<I>) -> Option<(BigInt, ByteChunks<I>)>
where
    I: Iterator<Item = Bytes>,
{
    read_integer_limited(input, usize::MAX)
}

/// Like `read_integer()`, but fails once the literal would have more than `max_digits` digits,
/// leading zeros included.
pub fn read_integer_limited<I>(
    input: ByteChunks<I>,
    max_digits: usize,
) -> Option<(BigInt, ByteChunks<I>)>
where
    I: Iterator<Item = Bytes>,
{
    let (magnitude, positive, rest) = read_magnitude(input, max_digits, true)?;
    let sign = if positive { Sign::Plus } else { Sign::Minus };
    Some((BigInt::from_biguint(sign, magnitude), rest))
}

/// Decodes an arbitrarily large natural number: digits with an optional leading `+`.
pub fn read_natural<I>(input: ByteChunks<I>) -> Option<(BigUint, ByteChunks<I>)>
where
    I: Iterator<Item = Bytes>,
{
    read_natural_limited(input, usize::MAX)
}

/// Like `read_natural()`, but fails once the literal would have more than `max_digits` digits.
pub fn read_natural_limited<I>(
    input: ByteChunks<I>,
    max_digits: usize,
) -> Option<(BigUint, ByteChunks<I>)>
where
    I: Iterator<Item = Bytes>,
{
    let (magnitude, _, rest) = read_magnitude(input, max_digits, false)?;
    Some((magnitude, rest))
}
