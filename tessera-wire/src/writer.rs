//! Encoder side of the masked record format.
//!
//! The engine itself only decodes; hosts and tests use these types to build
//! deltas that the engine will read back.

use crate::mask::MaskBits;

/// Growable big-endian byte sink.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn write_f32(&mut self, value: f32) -> &mut Self {
        self.write_u32(value.to_bits())
    }

    /// Bytes with a `u16` length prefix. Longer input is cut at `u16::MAX`.
    pub fn write_bytes16(&mut self, bytes: &[u8]) -> &mut Self {
        let len = bytes.len().min(u16::MAX as usize);
        self.write_u16(len as u16);
        self.buf.extend_from_slice(&bytes[..len]);
        self
    }

    /// Bytes with a `u32` length prefix.
    pub fn write_bytes32(&mut self, bytes: &[u8]) -> &mut Self {
        let len = bytes.len().min(u32::MAX as usize);
        self.write_u32(len as u32);
        self.buf.extend_from_slice(&bytes[..len]);
        self
    }

    pub fn write_str16(&mut self, s: &str) -> &mut Self {
        self.write_bytes16(s.as_bytes())
    }

    pub fn write_str32(&mut self, s: &str) -> &mut Self {
        self.write_bytes32(s.as_bytes())
    }

    /// A null-terminated string.
    pub fn write_nstr(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
        self
    }
}

/// Builds a masked record: a `u32` field mask followed by the fields whose
/// bits are set, in the order they were pushed.
#[derive(Debug, Clone, Default)]
pub struct MaskWriter {
    mask: MaskBits,
    body: Writer,
}

impl MaskWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave the next field unset.
    pub fn skip(&mut self) -> &mut Self {
        self.mask.push(false);
        self
    }

    /// Leave the next `n` mask bits unset.
    pub fn skip_n(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            self.mask.push(false);
        }
        self
    }

    /// Set the next field and encode its value.
    pub fn field(&mut self, write: impl FnOnce(&mut Writer)) -> &mut Self {
        self.mask.push(true);
        write(&mut self.body);
        self
    }

    /// A field whose mask bit is itself the value.
    pub fn flag(&mut self, value: bool) -> &mut Self {
        self.mask.push(value);
        self
    }

    /// A two-bit boolean: "present" then "value".
    pub fn bool_field(&mut self, value: Option<bool>) -> &mut Self {
        self.mask.push(value.is_some());
        self.mask.push(value.unwrap_or(false));
        self
    }

    pub fn finish(&self) -> Vec<u8> {
        let mut out = Writer::new();
        out.write_u32(self.mask.bits());
        out.buf.extend_from_slice(self.body.as_bytes());
        out.into_bytes()
    }
}
