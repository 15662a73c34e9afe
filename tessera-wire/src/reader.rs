//! Big-endian reader over a borrowed byte slice.

use crate::error::{Result, WireError};
use crate::mask::Mask;

/// Cursor over an encoded record.
///
/// Fixed-width reads fail with [`WireError::UnexpectedEof`] when the input is
/// short. Length-prefixed strings truncate to whatever bytes remain instead,
/// so a clipped nested record still yields its leading fields.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, wanted: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if wanted > remaining {
            return Err(WireError::UnexpectedEof { wanted, remaining });
        }
        let bytes = &self.data[self.pos..self.pos + wanted];
        self.pos += wanted;
        Ok(bytes)
    }

    fn take_truncated(&mut self, wanted: usize) -> &'a [u8] {
        let len = wanted.min(self.remaining());
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        bytes
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.take_array().map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.take_array().map(u32::from_be_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.take_array().map(u64::from_be_bytes)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_u32().map(f32::from_bits)
    }

    /// Bytes prefixed by a `u16` length.
    pub fn read_bytes16(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u16()? as usize;
        Ok(self.take_truncated(len))
    }

    /// Bytes prefixed by a `u32` length.
    pub fn read_bytes32(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u32()? as usize;
        Ok(self.take_truncated(len))
    }

    pub fn read_str16(&mut self) -> Result<&'a str> {
        std::str::from_utf8(self.read_bytes16()?).map_err(|_| WireError::InvalidUtf8)
    }

    pub fn read_str32(&mut self) -> Result<&'a str> {
        std::str::from_utf8(self.read_bytes32()?).map_err(|_| WireError::InvalidUtf8)
    }

    /// A null-terminated string. Every string costs at least its terminator,
    /// so a missing terminator is an end-of-input error.
    pub fn read_nstr(&mut self) -> Result<&'a str> {
        let rest = &self.data[self.pos..];
        let Some(end) = rest.iter().position(|&b| b == 0) else {
            return Err(WireError::UnexpectedEof {
                wanted: rest.len() + 1,
                remaining: rest.len(),
            });
        };
        self.pos += end + 1;
        std::str::from_utf8(&rest[..end]).map_err(|_| WireError::InvalidUtf8)
    }

    pub fn read_mask(&mut self) -> Result<Mask> {
        self.read_u32().map(Mask::new)
    }

    /// A nested record framed by a `u16` length.
    pub fn nested16(&mut self) -> Result<Reader<'a>> {
        self.read_bytes16().map(Reader::new)
    }

    /// A nested record framed by a `u32` length.
    pub fn nested32(&mut self) -> Result<Reader<'a>> {
        self.read_bytes32().map(Reader::new)
    }

    /// Read one optional field: consumes a mask bit, and when it is set
    /// decodes the value with `read`.
    pub fn field<T>(
        &mut self,
        mask: &mut Mask,
        read: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<Option<T>> {
        if mask.test_shift() {
            read(self).map(Some)
        } else {
            Ok(None)
        }
    }
}
