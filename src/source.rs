/// Pull-based reader over a fixed in-memory byte range.
///
/// Adapts a borrowed buffer to the sequential read interface the
/// decompression engine consumes: each read copies from the current
/// offset and advances it, and reads signal end-of-data once the offset
/// has reached the end of the range. Never reads past the end.
#[derive(Debug)]
pub struct BufferReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> BufferReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Total length of the underlying range.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Copy up to `buf.len()` bytes into `buf`, advancing the offset.
    ///
    /// Returns the number of bytes copied (short at the end of the
    /// range), or `None` once the offset has reached or passed the end.
    pub fn read(&mut self, buf: &mut [u8]) -> Option<usize> {
        if self.offset >= self.data.len() {
            return None;
        }
        let n = buf.len().min(self.data.len() - self.offset);
        buf[..n].copy_from_slice(&self.data[self.offset..self.offset + n]);
        self.offset += n;
        Some(n)
    }

    /// Advance past `n` bytes without copying, clamped at the end of the
    /// range. Returns how many bytes were actually skipped.
    pub fn skip(&mut self, n: usize) -> usize {
        let n = n.min(self.data.len() - self.offset);
        self.offset += n;
        n
    }
}
