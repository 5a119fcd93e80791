/// Byte-oriented destination for encoded documents
///
/// In most ways, it is convenient to think of `Target` as an analogous trait to
/// [`std::io::Write`]. The principal difference between the two is that
/// `push_all` is infallible and total: the encoder only
/// pushes bytes once a whole document has been rendered and transcoded, so
/// there is no partial write to recover from. The returned count is used
/// only for book-keeping on the caller side.
pub trait Target {
    /// Prepares for `extra` more bytes to be pushed.
    ///
    /// For underlying structures with a notion of capacity, such as
    /// `Vec<u8>`, this reserves the space up front; for many implementors it
    /// is simply a no-op.
    fn anticipate(&mut self, extra: usize);

    /// Returns a fresh object of the `Self` type with an initially empty buffer.
    fn create() -> Self;

    /// Appends the bytes of a slice, returning the length of the slice.
    fn push_all(&mut self, buf: &[u8]) -> usize;
}

/// Useful alias for `std::io::Sink` that is used to count the number of
/// bytes of an encoded document, without retaining them.
pub type ByteCounter = std::io::Sink;

impl Target for ByteCounter {
    #[inline(always)]
    fn anticipate(&mut self, _: usize) {}

    #[inline]
    fn create() -> Self {
        std::io::sink()
    }

    #[inline(always)]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        buf.len()
    }
}

impl Target for Vec<u8> {
    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    fn create() -> Self {
        Self::new()
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}
