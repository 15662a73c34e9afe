//! Positional field masks.
//!
//! Every record starts with a `u32` whose bits say which fields follow, in
//! declaration order. The mask is consumed from the low bit upward, so the
//! decoder must test bits in exactly the order the encoder set them.

/// A field mask being consumed bit by bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mask(u32);

impl Mask {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// True once no set bits remain.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Pop the lowest bit.
    #[inline]
    pub fn test_shift(&mut self) -> bool {
        let set = self.0 & 1 != 0;
        self.0 >>= 1;
        set
    }

    /// Pop a two-bit boolean: a "present" bit followed by the value bit.
    ///
    /// Both bits are always consumed, even when the field is absent.
    #[inline]
    pub fn test_shift_bool(&mut self) -> Option<bool> {
        let present = self.test_shift();
        let value = self.test_shift();
        present.then_some(value)
    }
}

impl From<u32> for Mask {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

/// Builds a mask in the same order a [`Mask`] is consumed.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MaskBits {
    bits: u32,
    next: u32,
}

impl MaskBits {
    pub(crate) fn push(&mut self, set: bool) {
        debug_assert!(self.next < 32, "mask overflow");
        if set {
            self.bits |= 1 << self.next;
        }
        self.next += 1;
    }

    pub(crate) fn bits(&self) -> u32 {
        self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_consumes_low_bit_first() {
        let mut mask = Mask::new(0b101);
        assert!(mask.test_shift());
        assert!(!mask.test_shift());
        assert!(mask.test_shift());
        assert!(mask.is_empty());
    }

    #[test]
    fn test_shift_bool_always_consumes_two_bits() {
        // absent, then present=true, then present=false
        let mut mask = Mask::new(0b01_11_10);
        assert_eq!(mask.test_shift_bool(), None);
        assert_eq!(mask.test_shift_bool(), Some(true));
        assert_eq!(mask.test_shift_bool(), Some(false));
    }

    #[test]
    fn test_mask_bits_matches_consumption_order() {
        let mut bits = MaskBits::default();
        bits.push(false);
        bits.push(true);
        bits.push(true);
        let mut mask = Mask::new(bits.bits());
        assert!(!mask.test_shift());
        assert!(mask.test_shift());
        assert!(mask.test_shift());
    }
}
