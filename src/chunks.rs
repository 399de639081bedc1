//! A lazily produced sequence of immutable byte chunks.

use bytes::{Buf, Bytes, BytesMut};

/// An ordered sequence of `Bytes` chunks pulled on demand from an iterator.
///
/// Chunks are reference counted, so splitting one never copies. Chunks pushed back onto the front
/// of the sequence (for instance the unconsumed tail of a chunk after a partial read) are yielded
/// before anything still held by the iterator. Empty chunks are never yielded.
#[derive(Clone, Debug)]
pub struct ByteChunks<I> {
    // Pushed back chunks, last element first.
    front: Vec<Bytes>,
    tail: I,
}

/// A `ByteChunks` whose chunks are all resident.
pub type StrictChunks = ByteChunks<std::vec::IntoIter<Bytes>>;

impl<I> ByteChunks<I>
where
    I: Iterator<Item = Bytes>,
{
    /// Creates a sequence that will pull chunks from `chunks` as it is consumed.
    pub fn new<C>(chunks: C) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        Self {
            front: Vec::new(),
            tail: chunks.into_iter(),
        }
    }

    /// Makes sure the next chunk, if any, is at the top of `front`.
    fn pull(&mut self) -> Option<&Bytes> {
        if self.front.is_empty() {
            let next = self.tail.by_ref().find(|c| !c.is_empty())?;
            self.front.push(next);
        }
        self.front.last()
    }

    /// Returns true if no bytes remain. May pull chunks from the underlying iterator.
    pub fn is_empty(&mut self) -> bool {
        self.pull().is_none()
    }

    /// Returns the first byte without consuming it.
    pub fn peek_byte(&mut self) -> Option<u8> {
        self.pull().map(|c| c[0])
    }

    /// Splits off the first chunk, returning it and the rest of the sequence.
    pub fn first_chunk(mut self) -> Option<(Bytes, Self)> {
        self.pull()?;
        let chunk = self.front.pop()?;
        Some((chunk, self))
    }

    /// Prepends `chunk` to the sequence.
    pub fn push_front(mut self, chunk: Bytes) -> Self {
        if !chunk.is_empty() {
            self.front.push(chunk);
        }
        self
    }

    /// Discards the first `n` bytes, or every byte if fewer than `n` remain.
    pub fn drop_prefix(mut self, mut n: usize) -> Self {
        while n > 0 {
            let Some(len) = self.pull().map(Bytes::len) else {
                break;
            };
            if len <= n {
                self.front.pop();
                n -= len;
            } else {
                if let Some(chunk) = self.front.last_mut() {
                    chunk.advance(n);
                }
                n = 0;
            }
        }
        self
    }

    /// Removes and returns the first `n` bytes, or every byte if fewer than `n` remain.
    ///
    /// Only copies when the prefix spans more than one chunk.
    pub fn split_prefix(&mut self, n: usize) -> Bytes {
        match self.pull().map(Bytes::len) {
            None => return Bytes::new(),
            Some(len) if len > n => {
                let head = self.front.last_mut().map(|c| c.split_to(n));
                return head.unwrap_or_default();
            }
            Some(len) if len == n => return self.front.pop().unwrap_or_default(),
            Some(_) => {}
        }

        let mut out = BytesMut::with_capacity(n);
        while out.len() < n {
            let want = n - out.len();
            let Some(chunk) = self.pull() else {
                break;
            };
            if chunk.len() <= want {
                out.extend_from_slice(chunk);
                self.front.pop();
            } else {
                let head = self.front.last_mut().map(|c| c.split_to(want));
                out.extend_from_slice(&head.unwrap_or_default());
            }
        }
        out.freeze()
    }

    /// Concatenates every remaining chunk into a single buffer.
    pub fn to_bytes(mut self) -> Bytes {
        let Some(first) = self.next() else {
            return Bytes::new();
        };
        let Some(second) = self.next() else {
            return first;
        };
        let mut out = BytesMut::from(&first[..]);
        out.extend_from_slice(&second);
        for chunk in self {
            out.extend_from_slice(&chunk);
        }
        out.freeze()
    }
}

impl<I> Iterator for ByteChunks<I>
where
    I: Iterator<Item = Bytes>,
{
    type Item = Bytes;

    #[inline]
    fn next(&mut self) -> Option<Bytes> {
        self.pull()?;
        self.front.pop()
    }
}

impl StrictChunks {
    /// Creates a sequence over already resident chunks.
    pub fn from_chunks(chunks: Vec<Bytes>) -> Self {
        Self::new(chunks)
    }

    /// Creates a single chunk sequence over static data.
    pub fn from_static(bytes: &'static [u8]) -> Self {
        Self::from(Bytes::from_static(bytes))
    }
}

impl From<Bytes> for StrictChunks {
    fn from(bytes: Bytes) -> Self {
        Self::new(vec![bytes])
    }
}

impl From<&[u8]> for StrictChunks {
    fn from(bytes: &[u8]) -> Self {
        Self::from(Bytes::copy_from_slice(bytes))
    }
}
