use byteorder::{ByteOrder, LittleEndian};

use crate::styres::error::{Error, Result};

/// Fixed-size little-endian value that can be pulled off a `Reader`.
pub trait Primitive: Sized {
    const SIZE: usize;
    fn from_le(bytes: &[u8]) -> Self;
}

impl Primitive for u8 {
    const SIZE: usize = 1;
    fn from_le(bytes: &[u8]) -> Self { bytes[0] }
}

impl Primitive for i8 {
    const SIZE: usize = 1;
    fn from_le(bytes: &[u8]) -> Self { bytes[0] as i8 }
}

impl Primitive for u16 {
    const SIZE: usize = 2;
    fn from_le(bytes: &[u8]) -> Self { LittleEndian::read_u16(bytes) }
}

impl Primitive for i16 {
    const SIZE: usize = 2;
    fn from_le(bytes: &[u8]) -> Self { LittleEndian::read_i16(bytes) }
}

impl Primitive for u32 {
    const SIZE: usize = 4;
    fn from_le(bytes: &[u8]) -> Self { LittleEndian::read_u32(bytes) }
}

/// Bounds-checked sequential reader over an in-memory buffer.
///
/// Every read fails with `TruncatedInput` instead of running past the end,
/// and leaves the position untouched when it does.
#[derive(Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    // absolute offset of data[0] within the file, for error reporting
    base: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self{ data, pos: 0, base: 0 }
    }

    /// Position relative to the start of this view.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Position relative to the start of the whole file.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn read<T: Primitive>(&mut self) -> Result<T> {
        let bytes = self.read_bytes(T::SIZE)?;
        Ok(T::from_le(bytes))
    }

    pub fn read_many<T: Primitive>(&mut self, count: usize) -> Result<Vec<T>> {
        let bytes = self.read_bytes(count * T::SIZE)?;
        Ok(bytes.chunks_exact(T::SIZE).map(T::from_le).collect())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(n)?;
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_tag(&mut self) -> Result<[u8; 4]> {
        let mut tag = [ 0u8; 4 ];
        tag.copy_from_slice(self.read_bytes(4)?);
        Ok(tag)
    }

    /// View of the next `n` bytes without advancing.
    pub fn peek_bytes(&self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        Ok(&self.data[self.pos..self.pos + n])
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Splits off a reader limited to the next `n` bytes and advances past them.
    pub fn sub_reader(&mut self, n: usize) -> Result<Reader<'a>> {
        let base = self.offset();
        let data = self.read_bytes(n)?;
        Ok(Reader{ data, pos: 0, base })
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(Error::TruncatedInput{
                offset: self.offset(),
                need: n,
                have: self.remaining(),
            });
        }
        Ok(())
    }
}
