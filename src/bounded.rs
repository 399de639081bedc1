//! Primitives whose encoded size depends on the value but never exceeds a known bound.
//!
//! ```
//! use prim_codec::{bounded, encode_bounded};
//!
//! let dec = bounded::dec_i32();
//! assert_eq!(dec.size_bound(), 11);
//! assert_eq!(&encode_bounded(&dec, -1729)[..], b"-1729");
//! ```

use std::marker::PhantomData;
use std::mem::size_of;

use bytes::BufMut;

use crate::fixed::FixedPrim;
use crate::raw::{self, MAX_DEC_LEN};
use crate::{Cursor, MAX_PREFIX_VARINT_LEN};

/// Input to `BoundedPrim::either()`: a value for exactly one of two primitives.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

/// Encoder for `A` that writes at most `size_bound()` bytes.
#[derive(Clone, Copy)]
pub struct BoundedPrim<A, F> {
    bound: usize,
    write: F,
    _marker: PhantomData<fn(A)>,
}

impl<A, F> BoundedPrim<A, F>
where
    F: Fn(A, &mut Cursor<'_>),
{
    /// Creates a primitive from its bound and a function that writes at most `bound` bytes.
    ///
    /// `write` receives a cursor limited to `bound` bytes; writing past it panics.
    pub fn new(bound: usize, write: F) -> Self {
        Self {
            bound,
            write,
            _marker: PhantomData,
        }
    }

    /// Returns the largest number of bytes any value encodes to.
    #[inline]
    pub fn size_bound(&self) -> usize {
        self.bound
    }

    /// Encodes `value` at the cursor, advances it, and returns the number of bytes written.
    ///
    /// # Panics
    ///
    /// If the cursor has fewer than `size_bound()` bytes remaining, even if this particular
    /// value would fit.
    #[inline]
    pub fn write(&self, value: A, cursor: &mut Cursor<'_>) -> usize {
        cursor.bounded_window(self.bound, |w| (self.write)(value, w))
    }

    /// Adapts this primitive to encode a `B` by first converting it with `f`.
    pub fn relabel<B>(self, f: impl Fn(B) -> A) -> BoundedPrim<B, impl Fn(B, &mut Cursor<'_>)> {
        let write = self.write;
        BoundedPrim::new(self.bound, move |b: B, c: &mut Cursor<'_>| write(f(b), c))
    }

    /// Encodes a pair by writing the first component with `self` followed directly by the second
    /// component with `other`. The bound is the sum of both bounds.
    pub fn pair<B, G>(
        self,
        other: BoundedPrim<B, G>,
    ) -> BoundedPrim<(A, B), impl Fn((A, B), &mut Cursor<'_>)>
    where
        G: Fn(B, &mut Cursor<'_>),
    {
        BoundedPrim::new(self.bound + other.bound, move |(a, b): (A, B), c: &mut Cursor<'_>| {
            self.write(a, c);
            other.write(b, c);
        })
    }

    /// Dispatches `Either::Left` values to `self` and `Either::Right` values to `other`. The
    /// bound is the larger of the two bounds.
    pub fn either<B, G>(
        self,
        other: BoundedPrim<B, G>,
    ) -> BoundedPrim<Either<A, B>, impl Fn(Either<A, B>, &mut Cursor<'_>)>
    where
        G: Fn(B, &mut Cursor<'_>),
    {
        let bound = self.bound.max(other.bound);
        BoundedPrim::new(bound, move |v: Either<A, B>, c: &mut Cursor<'_>| match v {
            Either::Left(a) => {
                self.write(a, c);
            }
            Either::Right(b) => {
                other.write(b, c);
            }
        })
    }
}

/// Lifts a fixed primitive into a bounded one whose bound is the fixed size. The result always
/// writes exactly that many bytes.
pub fn promote<A, F>(p: FixedPrim<A, F>) -> BoundedPrim<A, impl Fn(A, &mut Cursor<'_>)>
where
    F: Fn(A, &mut Cursor<'_>),
{
    p.to_bounded()
}

/// Encodes with `then` when `pred` holds for the value and with `otherwise` when it does not.
///
/// ```
/// use prim_codec::{bounded, encode_bounded, fixed};
///
/// // Small values as a single byte, everything else as a tagged big endian u32.
/// let compact = bounded::cond(
///     |v: &u32| *v < 0x80,
///     fixed::u8().relabel(|v: u32| v as u8).to_bounded(),
///     fixed::u8().pair(fixed::u32_be()).relabel(|v: u32| (0xff, v)).to_bounded(),
/// );
/// assert_eq!(compact.size_bound(), 5);
/// assert_eq!(&encode_bounded(&compact, 3)[..], &[3]);
/// assert_eq!(&encode_bounded(&compact, 256)[..], &[0xff, 0, 0, 1, 0]);
/// ```
pub fn cond<A, F, G>(
    pred: impl Fn(&A) -> bool,
    then: BoundedPrim<A, F>,
    otherwise: BoundedPrim<A, G>,
) -> BoundedPrim<A, impl Fn(A, &mut Cursor<'_>)>
where
    F: Fn(A, &mut Cursor<'_>),
    G: Fn(A, &mut Cursor<'_>),
{
    then.either(otherwise).relabel(move |a: A| {
        if pred(&a) {
            Either::Left(a)
        } else {
            Either::Right(a)
        }
    })
}

/// A primitive that writes nothing.
pub fn empty<A>() -> BoundedPrim<A, impl Fn(A, &mut Cursor<'_>)> {
    BoundedPrim::new(0, |_: A, _: &mut Cursor<'_>| {})
}

/// Longest decimal rendering of a value of the given width, sign included.
const fn dec_bound(bits: u32, signed: bool) -> usize {
    if signed {
        raw::dec_len(u128::MAX >> (128 - bits + 1)) + 1
    } else {
        raw::dec_len(u128::MAX >> (128 - bits))
    }
}

#[inline]
fn put_dec_u64(v: u64, c: &mut Cursor<'_>) {
    let mut digits = [0u8; MAX_DEC_LEN];
    let start = raw::render_dec_u64(v, &mut digits);
    c.put_slice(&digits[start..]);
}

#[inline]
fn put_dec_u128(v: u128, c: &mut Cursor<'_>) {
    let mut digits = [0u8; MAX_DEC_LEN];
    let start = raw::render_dec_u128(v, &mut digits);
    c.put_slice(&digits[start..]);
}

macro_rules! dec_signed_prims {
    ($($t:ty => $name:ident, $wide:ty, $put:ident;)*) => {
        $(
            #[doc = concat!("`", stringify!($t), "` as ASCII decimal with a leading `-` when negative.")]
            pub fn $name() -> BoundedPrim<$t, impl Fn($t, &mut Cursor<'_>)> {
                BoundedPrim::new(dec_bound(<$t>::BITS, true), |v: $t, c: &mut Cursor<'_>| {
                    if v < 0 {
                        c.put_u8(b'-');
                    }
                    $put(v.unsigned_abs() as $wide, c);
                })
            }
        )*
    };
}

macro_rules! dec_unsigned_prims {
    ($($t:ty => $name:ident, $wide:ty, $put:ident;)*) => {
        $(
            #[doc = concat!("`", stringify!($t), "` as ASCII decimal.")]
            pub fn $name() -> BoundedPrim<$t, impl Fn($t, &mut Cursor<'_>)> {
                BoundedPrim::new(dec_bound(<$t>::BITS, false), |v: $t, c: &mut Cursor<'_>| {
                    $put(v as $wide, c)
                })
            }
        )*
    };
}

dec_signed_prims! {
    i8 => dec_i8, u64, put_dec_u64;
    i16 => dec_i16, u64, put_dec_u64;
    i32 => dec_i32, u64, put_dec_u64;
    i64 => dec_i64, u64, put_dec_u64;
    isize => dec_isize, u64, put_dec_u64;
    i128 => dec_i128, u128, put_dec_u128;
}

dec_unsigned_prims! {
    u8 => dec_u8, u64, put_dec_u64;
    u16 => dec_u16, u64, put_dec_u64;
    u32 => dec_u32, u64, put_dec_u64;
    u64 => dec_u64, u64, put_dec_u64;
    usize => dec_usize, u64, put_dec_u64;
    u128 => dec_u128, u128, put_dec_u128;
}

macro_rules! hex_prims {
    ($($t:ty => $name:ident;)*) => {
        $(
            #[doc = concat!("`", stringify!($t), "` as lowercase hex without leading zeros.")]
            pub fn $name() -> BoundedPrim<$t, impl Fn($t, &mut Cursor<'_>)> {
                BoundedPrim::new(size_of::<$t>() * 2, |v: $t, c: &mut Cursor<'_>| {
                    let v = u64::from(v);
                    let len = raw::hex_len(v);
                    raw::write_hex(v, len, c.claim(len));
                })
            }
        )*
    };
}

hex_prims! {
    u8 => hex_u8;
    u16 => hex_u16;
    u32 => hex_u32;
    u64 => hex_u64;
}

/// Writes `v` as an unsigned LEB128 varint: seven bits per byte, least significant group first,
/// high bit set on every byte but the last.
#[inline]
fn put_leb128(mut v: u64, c: &mut Cursor<'_>) {
    while v >= 0x80 {
        c.put_u8((v as u8) | 0x80);
        v >>= 7;
    }
    c.put_u8(v as u8);
}

macro_rules! leb128_prims {
    ($($t:ty => $name:ident;)*) => {
        $(
            #[doc = concat!("`", stringify!($t), "` as an unsigned LEB128 varint.")]
            pub fn $name() -> BoundedPrim<$t, impl Fn($t, &mut Cursor<'_>)> {
                BoundedPrim::new(raw::leb128_len(<$t>::MAX as u64), |v: $t, c: &mut Cursor<'_>| {
                    put_leb128(u64::from(v), c)
                })
            }
        )*
    };
}

leb128_prims! {
    u16 => leb128_u16;
    u32 => leb128_u32;
    u64 => leb128_u64;
}

/// Writes `v` as a prefix varint: the count of leading one bits in the first byte says how many
/// bytes follow, and the value is stored big endian in the remaining bits.
#[inline]
fn put_prefix_varint(v: u64, c: &mut Cursor<'_>) {
    let len = raw::prefix_varint_len(v);
    if len == 1 {
        c.put_u8(v as u8);
    } else if len < MAX_PREFIX_VARINT_LEN {
        c.put_uint(v | raw::prefix_varint_tag(len), len);
    } else {
        c.put_u8(u8::MAX);
        c.put_u64(v);
    }
}

/// `u64` as a prefix varint; values closer to zero produce shorter output.
pub fn prefix_varint_u64() -> BoundedPrim<u64, impl Fn(u64, &mut Cursor<'_>)> {
    BoundedPrim::new(MAX_PREFIX_VARINT_LEN, |v: u64, c: &mut Cursor<'_>| {
        put_prefix_varint(v, c)
    })
}

/// `i64` as a zigzag coded prefix varint so that small negative numbers stay short.
pub fn prefix_varint_i64() -> BoundedPrim<i64, impl Fn(i64, &mut Cursor<'_>)> {
    prefix_varint_u64().relabel(raw::zigzag_encode)
}
