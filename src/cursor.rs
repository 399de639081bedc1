//! A bounds-checked write position over a borrowed output buffer.

use bytes::buf::UninitSlice;
use bytes::BufMut;

/// A mutable window over an output buffer plus the current write offset.
///
/// Primitives write through the `bytes::BufMut` methods (`put_u8()`, `put_u32_le()`,
/// `put_slice()`, ...). Every write is checked against the end of the window, so a primitive
/// cannot escape the size or bound it declared: an attempt to do so panics, as it indicates a
/// defective primitive rather than bad input.
pub struct Cursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of bytes written so far.
    #[inline]
    pub fn written(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes that may still be written.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns the bytes written so far.
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Claims the next `len` bytes for direct writing and advances past them.
    ///
    /// # Panics
    ///
    /// If fewer than `len` bytes remain.
    #[inline]
    pub fn claim(&mut self, len: usize) -> &mut [u8] {
        self.check(len);
        let start = self.pos;
        self.pos += len;
        &mut self.buf[start..self.pos]
    }

    /// Runs `f` against a window of exactly `size` bytes and then advances past the whole window,
    /// regardless of how much of it `f` wrote.
    #[inline]
    pub(crate) fn fixed_window(&mut self, size: usize, f: impl FnOnce(&mut Cursor<'_>)) {
        let mut window = Cursor::new(self.claim(size));
        f(&mut window);
        debug_assert_eq!(window.written(), size, "fixed primitive wrote a short value");
    }

    /// Runs `f` against a window of at most `bound` bytes and advances past what `f` wrote.
    /// Returns the number of bytes written.
    #[inline]
    pub(crate) fn bounded_window(
        &mut self,
        bound: usize,
        f: impl FnOnce(&mut Cursor<'_>),
    ) -> usize {
        self.check(bound);
        let start = self.pos;
        let mut window = Cursor::new(&mut self.buf[start..start + bound]);
        f(&mut window);
        let written = window.written();
        self.pos += written;
        written
    }

    #[inline]
    fn check(&self, len: usize) {
        assert!(
            len <= self.remaining(),
            "write of {} bytes exceeds cursor capacity ({} remaining)",
            len,
            self.remaining()
        );
    }
}

// SAFETY: chunk_mut() always exposes exactly the unwritten tail of an initialized slice and
// advance_mut() refuses to move past the end of it.
unsafe impl BufMut for Cursor<'_> {
    #[inline]
    fn remaining_mut(&self) -> usize {
        self.remaining()
    }

    #[inline]
    unsafe fn advance_mut(&mut self, cnt: usize) {
        self.check(cnt);
        self.pos += cnt;
    }

    #[inline]
    fn chunk_mut(&mut self) -> &mut UninitSlice {
        UninitSlice::new(&mut self.buf[self.pos..])
    }

    #[inline]
    fn put_slice(&mut self, src: &[u8]) {
        self.claim(src.len()).copy_from_slice(src);
    }

    #[inline]
    fn put_u8(&mut self, n: u8) {
        self.claim(1)[0] = n;
    }
}
