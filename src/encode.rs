//! Encoding pipelines: size the destination from a primitive's size or bound, allocate once, then
//! run the primitive.

use bytes::Bytes;
use tracing::trace;

use crate::{BoundedPrim, Cursor, FixedPrim};

/// Returned when a caller supplied buffer cannot hold a primitive's size or bound.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CapacityError {
    /// Bytes the primitive may write.
    pub required: usize,
    /// Bytes the buffer holds.
    pub available: usize,
}

impl std::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "buffer of {} bytes cannot hold an encoding of up to {} bytes",
            self.available, self.required
        )
    }
}

impl std::error::Error for CapacityError {}

#[inline]
fn check_capacity(required: usize, available: usize) -> Result<(), CapacityError> {
    if required > available {
        Err(CapacityError {
            required,
            available,
        })
    } else {
        Ok(())
    }
}

/// Encodes `value` into a buffer of exactly `p.size()` bytes.
pub fn encode_fixed<A, F>(p: &FixedPrim<A, F>, value: A) -> Bytes
where
    F: Fn(A, &mut Cursor<'_>),
{
    let mut buf = vec![0u8; p.size()];
    p.write(value, &mut Cursor::new(&mut buf));
    Bytes::from(buf)
}

/// Encodes `value` into a buffer allocated with `p.size_bound()` bytes and trimmed to the bytes
/// actually written.
pub fn encode_bounded<A, F>(p: &BoundedPrim<A, F>, value: A) -> Bytes
where
    F: Fn(A, &mut Cursor<'_>),
{
    let mut buf = vec![0u8; p.size_bound()];
    let len = p.write(value, &mut Cursor::new(&mut buf));
    buf.truncate(len);
    Bytes::from(buf)
}

/// Encodes every value of `values` back to back into a single exactly sized buffer.
pub fn encode_fixed_iter<A, F, V>(p: &FixedPrim<A, F>, values: V) -> Bytes
where
    F: Fn(A, &mut Cursor<'_>),
    V: IntoIterator<Item = A>,
    V::IntoIter: ExactSizeIterator,
{
    let values = values.into_iter();
    let mut buf = vec![0u8; values.len() * p.size()];
    let mut cursor = Cursor::new(&mut buf);
    for v in values {
        p.write(v, &mut cursor);
    }
    Bytes::from(buf)
}

/// Encodes every value of `values` back to back. Allocates room for the bound of every value once
/// and trims the unused tail at the end.
pub fn encode_bounded_iter<A, F, V>(p: &BoundedPrim<A, F>, values: V) -> Bytes
where
    F: Fn(A, &mut Cursor<'_>),
    V: IntoIterator<Item = A>,
    V::IntoIter: ExactSizeIterator,
{
    let values = values.into_iter();
    let capacity = values.len() * p.size_bound();
    let mut buf = vec![0u8; capacity];
    let mut cursor = Cursor::new(&mut buf);
    for v in values {
        p.write(v, &mut cursor);
    }
    let len = cursor.written();
    trace!(capacity, len, "trimming bounded encoding");
    buf.truncate(len);
    Bytes::from(buf)
}

/// Encodes `value` at the start of `dst` and returns the number of bytes written.
///
/// # Errors
///
/// Returns `CapacityError` without writing anything if `dst` is shorter than `p.size()`.
pub fn encode_fixed_into<A, F>(
    p: &FixedPrim<A, F>,
    value: A,
    dst: &mut [u8],
) -> Result<usize, CapacityError>
where
    F: Fn(A, &mut Cursor<'_>),
{
    check_capacity(p.size(), dst.len())?;
    p.write(value, &mut Cursor::new(dst));
    Ok(p.size())
}

/// Encodes `value` at the start of `dst` and returns the number of bytes written.
///
/// # Errors
///
/// Returns `CapacityError` without writing anything if `dst` is shorter than `p.size_bound()`,
/// even when this particular value would have fit.
pub fn encode_bounded_into<A, F>(
    p: &BoundedPrim<A, F>,
    value: A,
    dst: &mut [u8],
) -> Result<usize, CapacityError>
where
    F: Fn(A, &mut Cursor<'_>),
{
    check_capacity(p.size_bound(), dst.len())?;
    Ok(p.write(value, &mut Cursor::new(dst)))
}
