//! Binary encoding primitives with sizes known before any value is seen, and streaming decimal
//! integer decoders over chunked input.
//!
//! # Encoding
//!
//! A `FixedPrim<A, _>` always writes exactly `size()` bytes for an `A`; a `BoundedPrim<A, _>`
//! writes at most `size_bound()` bytes. Both are plain values holding a size and a write function
//! and compose with `relabel()`, `pair()`, `either()` and `bounded::cond()`. Because the size or
//! bound of a composed primitive is known up front, an encoding pipeline allocates its
//! destination once and then runs the primitive without further capacity checks. Primitives write
//! through a `Cursor`, which refuses writes beyond the declared size or bound.
//!
//! ```
//! use prim_codec::{bounded, encode_bounded, fixed};
//!
//! // A one byte tag followed by a decimal payload.
//! let record = fixed::u8().to_bounded().pair(bounded::dec_i64());
//! assert_eq!(record.size_bound(), 21);
//! assert_eq!(&encode_bounded(&record, (b'#', -42))[..], b"#-42");
//! ```
//!
//! # Decoding
//!
//! `read_int()` and `read_integer()` parse an optionally signed ASCII decimal literal from the
//! front of a `ByteChunks` sequence, pulling chunks lazily and returning the unconsumed remainder.
//! Overflow of a machine integer is detected before it happens, and the result never depends on
//! where chunk boundaries fall.
//!
//! ```
//! use bytes::Bytes;
//! use prim_codec::{read_int, ByteChunks};
//!
//! let chunks = ByteChunks::from_chunks(vec![Bytes::from("-92233720"), Bytes::from("36854775808!")]);
//! let (v, rest) = read_int::<i64, _>(chunks).unwrap();
//! assert_eq!(v, i64::MIN);
//! assert_eq!(&rest.to_bytes()[..], b"!");
//! ```
//!
//! `DecimalBuf` and `PrimBufMut` provide the same operations on `bytes::{Buf,BufMut}`.
pub mod bounded;
mod bytes;
mod chunks;
mod cursor;
mod decimal;
mod encode;
pub mod fixed;
mod integer;
mod raw;

pub use crate::bounded::{BoundedPrim, Either};
pub use crate::bytes::{DecimalBuf, PrimBufMut};
pub use crate::chunks::{ByteChunks, StrictChunks};
pub use crate::cursor::Cursor;
pub use crate::decimal::{read_int, read_int_limited, DecimalInt};
pub use crate::encode::{
    encode_bounded, encode_bounded_into, encode_bounded_iter, encode_fixed, encode_fixed_into,
    encode_fixed_iter, CapacityError,
};
pub use crate::fixed::FixedPrim;
pub use crate::integer::{read_integer, read_integer_limited, read_natural, read_natural_limited};
pub use crate::raw::Storable;

/// Whether scalars are stored straight to possibly unaligned addresses.
///
/// True on architectures where unaligned stores are safe and fast, unless the `aligned-stores`
/// feature is enabled; otherwise `fixed::storable()` goes through an aligned temporary.
pub const UNALIGNED_STORES: bool = cfg!(all(
    not(feature = "aligned-stores"),
    any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "aarch64",
        all(target_arch = "powerpc64", target_endian = "little"),
    )
));

/// Decimal digits per limb when decoding arbitrary precision integers.
pub const LIMB_DIGITS: u32 = 9;

/// Maximum number of bytes a single encoded prefix varint will occupy.
pub const MAX_PREFIX_VARINT_LEN: usize = 9;
