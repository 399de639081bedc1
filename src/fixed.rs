//! Primitives whose encoded size is a constant known before any value is seen.
//!
//! A pipeline built only from `FixedPrim`s knows the exact output length up front, so it can
//! allocate its destination once and fill it without further checks.
//!
//! ```
//! use prim_codec::{encode_fixed, fixed};
//!
//! let header = fixed::u16_be().pair(fixed::u32_le());
//! assert_eq!(header.size(), 6);
//! assert_eq!(&encode_fixed(&header, (0x0102, 7))[..], &[1, 2, 7, 0, 0, 0]);
//! ```

use std::marker::PhantomData;
use std::mem::size_of;

use bytes::BufMut;

use crate::bounded::BoundedPrim;
use crate::raw::{self, Storable};
use crate::Cursor;

/// Encoder for `A` that always writes exactly `size()` bytes.
#[derive(Clone, Copy)]
pub struct FixedPrim<A, F> {
    size: usize,
    write: F,
    _marker: PhantomData<fn(A)>,
}

impl<A, F> FixedPrim<A, F>
where
    F: Fn(A, &mut Cursor<'_>),
{
    /// Creates a primitive from its size and a function that writes exactly `size` bytes.
    ///
    /// `write` receives a cursor limited to `size` bytes; writing past it panics.
    pub fn new(size: usize, write: F) -> Self {
        Self {
            size,
            write,
            _marker: PhantomData,
        }
    }

    /// Returns the number of bytes every value encodes to.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Encodes `value` at the cursor and advances it by exactly `size()` bytes.
    ///
    /// # Panics
    ///
    /// If the cursor has fewer than `size()` bytes remaining.
    #[inline]
    pub fn write(&self, value: A, cursor: &mut Cursor<'_>) {
        cursor.fixed_window(self.size, |w| (self.write)(value, w));
    }

    /// Adapts this primitive to encode a `B` by first converting it with `f`.
    pub fn relabel<B>(self, f: impl Fn(B) -> A) -> FixedPrim<B, impl Fn(B, &mut Cursor<'_>)> {
        let write = self.write;
        FixedPrim::new(self.size, move |b: B, c: &mut Cursor<'_>| write(f(b), c))
    }

    /// Encodes a pair by writing the first component with `self` and the second component with
    /// `other` immediately after it.
    pub fn pair<B, G>(
        self,
        other: FixedPrim<B, G>,
    ) -> FixedPrim<(A, B), impl Fn((A, B), &mut Cursor<'_>)>
    where
        G: Fn(B, &mut Cursor<'_>),
    {
        FixedPrim::new(self.size + other.size, move |(a, b): (A, B), c: &mut Cursor<'_>| {
            self.write(a, c);
            other.write(b, c);
        })
    }

    /// Promotes this primitive to a `BoundedPrim` whose bound is its size.
    pub fn to_bounded(self) -> BoundedPrim<A, impl Fn(A, &mut Cursor<'_>)> {
        BoundedPrim::new(self.size, move |a: A, c: &mut Cursor<'_>| self.write(a, c))
    }
}

/// A primitive that writes nothing.
pub fn empty<A>() -> FixedPrim<A, impl Fn(A, &mut Cursor<'_>)> {
    FixedPrim::new(0, |_: A, _: &mut Cursor<'_>| {})
}

/// Encodes a scalar by copying its in-memory (host endian) representation.
///
/// On targets without safe unaligned stores, or with the `aligned-stores` feature enabled, the
/// value is staged in an aligned temporary first. See `UNALIGNED_STORES`.
pub fn storable<T: Storable>() -> FixedPrim<T, impl Fn(T, &mut Cursor<'_>)> {
    FixedPrim::new(size_of::<T>(), |v: T, c: &mut Cursor<'_>| {
        raw::store(v, c.claim(size_of::<T>()))
    })
}

/// A single byte.
pub fn u8() -> FixedPrim<u8, impl Fn(u8, &mut Cursor<'_>)> {
    FixedPrim::new(1, |v: u8, c: &mut Cursor<'_>| c.put_u8(v))
}

/// A single signed byte.
pub fn i8() -> FixedPrim<i8, impl Fn(i8, &mut Cursor<'_>)> {
    FixedPrim::new(1, |v: i8, c: &mut Cursor<'_>| c.put_i8(v))
}

/// The low 8 bits of a `char`. Code points above U+00FF are truncated.
pub fn char8() -> FixedPrim<char, impl Fn(char, &mut Cursor<'_>)> {
    u8().relabel(|ch: char| ch as u32 as u8)
}

macro_rules! endian_prims {
    ($($t:ty => $be:ident, $le:ident, $host:ident;)*) => {
        $(
            #[doc = concat!("Big endian `", stringify!($t), "`.")]
            pub fn $be() -> FixedPrim<$t, impl Fn($t, &mut Cursor<'_>)> {
                FixedPrim::new(size_of::<$t>(), |v: $t, c: &mut Cursor<'_>| {
                    c.put_slice(&v.to_be_bytes())
                })
            }

            #[doc = concat!("Little endian `", stringify!($t), "`.")]
            pub fn $le() -> FixedPrim<$t, impl Fn($t, &mut Cursor<'_>)> {
                FixedPrim::new(size_of::<$t>(), |v: $t, c: &mut Cursor<'_>| {
                    c.put_slice(&v.to_le_bytes())
                })
            }

            #[doc = concat!("Host endian `", stringify!($t), "`.")]
            pub fn $host() -> FixedPrim<$t, impl Fn($t, &mut Cursor<'_>)> {
                storable::<$t>()
            }
        )*
    };
}

endian_prims! {
    u16 => u16_be, u16_le, u16_host;
    u32 => u32_be, u32_le, u32_host;
    u64 => u64_be, u64_le, u64_host;
    i16 => i16_be, i16_le, i16_host;
    i32 => i32_be, i32_le, i32_host;
    i64 => i64_be, i64_le, i64_host;
    f32 => f32_be, f32_le, f32_host;
    f64 => f64_be, f64_le, f64_host;
}

macro_rules! hex_fixed_prims {
    ($($t:ty => $name:ident;)*) => {
        $(
            #[doc = concat!(
                "`", stringify!($t), "` as zero padded lowercase hex, two digits per byte."
            )]
            pub fn $name() -> FixedPrim<$t, impl Fn($t, &mut Cursor<'_>)> {
                const WIDTH: usize = size_of::<$t>() * 2;
                FixedPrim::new(WIDTH, |v: $t, c: &mut Cursor<'_>| {
                    raw::write_hex(u64::from(v), WIDTH, c.claim(WIDTH))
                })
            }
        )*
    };
}

hex_fixed_prims! {
    u8 => hex_fixed_u8;
    u16 => hex_fixed_u16;
    u32 => hex_fixed_u32;
    u64 => hex_fixed_u64;
}
