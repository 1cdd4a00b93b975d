use crate::error::ReadError;

/// Forward-only little-endian cursor over an immutable byte buffer.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset into the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, wanted: usize) -> Result<&'a [u8], ReadError> {
        if wanted > self.remaining() {
            return Err(ReadError::OutOfBounds {
                offset: self.pos,
                wanted,
                len: self.data.len(),
            });
        }

        let data = self.data;
        let bytes = &data[self.pos..self.pos + wanted];
        self.pos += wanted;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_byte(&mut self) -> Result<u8, ReadError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_short(&mut self) -> Result<u16, ReadError> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_int(&mut self) -> Result<u32, ReadError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    /// Reads a 32-bit length prefix followed by that many single-byte characters.
    ///
    /// Every byte maps to the char with the same code point (Latin-1), so no
    /// input is ever rejected as invalid text.
    pub fn read_string(&mut self) -> Result<String, ReadError> {
        let len = self.read_int()? as usize;
        let bytes = self.take(len)?;
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }
}
