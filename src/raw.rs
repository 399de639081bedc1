//! Low level routines shared by the primitive library: scalar stores, digit rendering and varint
//! arithmetic.
//!
//! Everything here writes into plain slices; callers obtain those slices from a `Cursor` so the
//! length checks happen once, up front.

use crate::UNALIGNED_STORES;

/// Scalar types that may be copied byte-for-byte into an output buffer.
///
/// This trait is sealed: every implementor is a plain number without padding bytes.
pub trait Storable: Copy + sealed::Sealed {}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_storable {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}
            impl Storable for $t {}
        )*
    };
}
impl_storable!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

/// Copies the in-memory representation of `v` to the front of `dst`.
///
/// Targets that cannot store to unaligned addresses go through an aligned temporary.
///
/// # Panics
///
/// If `dst` is shorter than `size_of::<T>()`.
#[inline]
pub(crate) fn store<T: Storable>(v: T, dst: &mut [u8]) {
    store_with(v, dst, UNALIGNED_STORES)
}

/// `store()` with the unaligned store capability passed in rather than taken from the target.
#[inline]
pub(crate) fn store_with<T: Storable>(v: T, dst: &mut [u8], unaligned: bool) {
    let len = std::mem::size_of::<T>();
    let dst = &mut dst[..len];
    if unaligned {
        // SAFETY: dst holds exactly size_of::<T>() writable bytes and T has no padding.
        unsafe { std::ptr::write_unaligned(dst.as_mut_ptr() as *mut T, v) }
    } else {
        let tmp = v;
        // SAFETY: tmp is a live, aligned T; dst holds exactly size_of::<T>() writable bytes.
        unsafe {
            std::ptr::copy_nonoverlapping(&tmp as *const T as *const u8, dst.as_mut_ptr(), len)
        }
    }
}

/// Number of decimal digits needed to render `v`.
pub(crate) const fn dec_len(mut v: u128) -> usize {
    let mut len = 1;
    while v >= 10 {
        v /= 10;
        len += 1;
    }
    len
}

/// Longest possible rendering of a `u128`.
pub(crate) const MAX_DEC_LEN: usize = dec_len(u128::MAX);

/// Renders `v` right-aligned into `buf` and returns the index of the first digit.
#[inline]
pub(crate) fn render_dec_u64(mut v: u64, buf: &mut [u8; MAX_DEC_LEN]) -> usize {
    let mut i = buf.len();
    loop {
        i -= 1;
        buf[i] = b'0' + (v % 10) as u8;
        v /= 10;
        if v == 0 {
            return i;
        }
    }
}

/// 128-bit variant of `render_dec_u64()`. Peels 19 digits at a time so that most of the work
/// happens in 64-bit arithmetic.
pub(crate) fn render_dec_u128(mut v: u128, buf: &mut [u8; MAX_DEC_LEN]) -> usize {
    const CHUNK: u128 = 10_000_000_000_000_000_000;
    let mut end = buf.len();
    while v >= CHUNK {
        let mut low = (v % CHUNK) as u64;
        v /= CHUNK;
        for _ in 0..19 {
            end -= 1;
            buf[end] = b'0' + (low % 10) as u8;
            low /= 10;
        }
    }
    let mut tmp = [0u8; MAX_DEC_LEN];
    let start = render_dec_u64(v as u64, &mut tmp);
    let len = tmp.len() - start;
    buf[end - len..end].copy_from_slice(&tmp[start..]);
    end - len
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Writes the low `width` nibbles of `v` as lowercase hex, most significant first.
#[inline]
pub(crate) fn write_hex(v: u64, width: usize, dst: &mut [u8]) {
    for (i, out) in dst[..width].iter_mut().enumerate() {
        let shift = (width - 1 - i) * 4;
        *out = HEX_DIGITS[((v >> shift) & 0xf) as usize];
    }
}

/// Number of hex digits needed to render `v` without leading zeros.
#[inline]
pub(crate) const fn hex_len(v: u64) -> usize {
    ((67 - (v | 1).leading_zeros()) / 4) as usize
}

/// Return the number of bytes required to prefix varint encode `v` in `[1, MAX_PREFIX_VARINT_LEN]`.
#[inline]
pub(crate) const fn prefix_varint_len(v: u64) -> usize {
    if v < (1 << 56) {
        (70 - (v | 1).leading_zeros() as usize) / 7
    } else {
        9
    }
}

/// Tag bits to OR into an n-byte prefix varint, `n` in `2..=8`, aligned to the low `n` bytes.
#[inline(always)]
pub(crate) const fn prefix_varint_tag(len: usize) -> u64 {
    !(u64::MAX >> (len - 1)) >> (64 - len * 8)
}

/// Maps negative values to positive values, creating a sequence that alternates between negative
/// and positive values so that small magnitudes produce small varints.
#[inline]
pub(crate) fn zigzag_encode(v: i64) -> u64 {
    ((v >> 63) ^ (v << 1)) as u64
}

/// Inverts `zigzag_encode()`.
#[inline]
#[cfg(test)]
pub(crate) fn zigzag_decode(v: u64) -> i64 {
    (v >> 1) as i64 ^ -(v as i64 & 1)
}

/// Number of bytes needed to LEB128 encode `v`.
#[inline]
pub(crate) const fn leb128_len(v: u64) -> usize {
    (70 - (v | 1).leading_zeros() as usize) / 7
}
