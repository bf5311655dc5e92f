//! Chunk integers and the bit accumulator.
//!
//! A payload chunk holds up to `chunk_bits` bits (1246 by default), far wider
//! than any machine integer. [`ChunkValue`] stores it as little-endian `u32`
//! limbs and offers exactly the arithmetic the codec needs: shift-in a bit,
//! multiply-add a small digit, divide by a small radix.
//!
//! All transitions take `self` by value and return the new state.

use crate::alphabet::{digit_char, digit_value, BASE};
use crate::{CodecError, Result};

/// Arbitrary-width unsigned integer in little-endian `u32` limbs.
///
/// Limbs are kept trimmed: no trailing zero limbs, zero is the empty vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkValue {
    limbs: Vec<u32>,
}

impl ChunkValue {
    /// Zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Value of a `u64`.
    pub fn from_u64(value: u64) -> Self {
        Self {
            limbs: vec![value as u32, (value >> 32) as u32],
        }
        .trimmed()
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Number of significant bits (0 for zero).
    pub fn bit_length(&self) -> usize {
        match self.limbs.last() {
            Some(&top) => (self.limbs.len() - 1) * 32 + (32 - top.leading_zeros() as usize),
            None => 0,
        }
    }

    /// Bit `index`, counting from the least significant bit.
    pub fn bit(&self, index: usize) -> bool {
        self.limbs
            .get(index / 32)
            .map(|limb| (limb >> (index % 32)) & 1 == 1)
            .unwrap_or(false)
    }

    /// Convert to `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        match self.limbs.as_slice() {
            [] => Some(0),
            [lo] => Some(*lo as u64),
            [lo, hi] => Some(((*hi as u64) << 32) | *lo as u64),
            _ => None,
        }
    }

    /// `self * 2 + bit`.
    pub fn push_bit(self, bit: bool) -> Self {
        self.mul_add(2, bit as u32)
    }

    /// `self * mul + add`.
    pub fn mul_add(mut self, mul: u32, add: u32) -> Self {
        let mut carry = add as u64;
        for limb in self.limbs.iter_mut() {
            let wide = *limb as u64 * mul as u64 + carry;
            *limb = wide as u32;
            carry = wide >> 32;
        }
        if carry != 0 {
            self.limbs.push(carry as u32);
        }
        self.trimmed()
    }

    /// `(self / divisor, self % divisor)`; `divisor` must be non-zero.
    pub fn div_rem(mut self, divisor: u32) -> (Self, u32) {
        let mut rem = 0u64;
        for limb in self.limbs.iter_mut().rev() {
            let wide = (rem << 32) | *limb as u64;
            *limb = (wide / divisor as u64) as u32;
            rem = wide % divisor as u64;
        }
        (self.trimmed(), rem as u32)
    }

    /// Encode as exactly `digits` base-92 characters, most significant first.
    pub fn to_base92(self, digits: usize) -> Result<String> {
        let mut value = self;
        let mut out = Vec::with_capacity(digits);
        for _ in 0..digits {
            let (quotient, rem) = value.div_rem(BASE);
            out.push(digit_char(rem));
            value = quotient;
        }
        if !value.is_zero() {
            return Err(CodecError::Overflow {
                width: digits,
                unit: "digits",
            });
        }
        Ok(out.into_iter().rev().collect())
    }

    /// Decode base-92 characters, most significant first.
    ///
    /// `offset` is the position of `encoded[0]` in the whole input, for error reports.
    /// A non-ASCII byte is reported as `U+FFFD`; callers holding the whole
    /// string can recover the character at `position`.
    pub fn from_base92(encoded: &[u8], offset: usize) -> Result<Self> {
        encoded
            .iter()
            .enumerate()
            .try_fold(Self::zero(), |value, (i, &byte)| match digit_value(byte) {
                Some(digit) => Ok(value.mul_add(BASE, digit)),
                None => Err(CodecError::InvalidChar {
                    ch: if byte.is_ascii() {
                        byte as char
                    } else {
                        char::REPLACEMENT_CHARACTER
                    },
                    position: offset + i,
                }),
            })
    }

    fn trimmed(mut self) -> Self {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
        self
    }
}

/// Fewest base-92 digits `m` with `92^m ≥ 2^bits` (0 for 0 bits).
///
/// Computed exactly: `92^m` is never a power of two for `m ≥ 1`, so the
/// condition is `bit_length(92^m) > bits`.
pub fn min_digits_for_bits(bits: usize) -> usize {
    if bits == 0 {
        return 0;
    }
    let mut power = ChunkValue::from_u64(1);
    let mut digits = 0;
    while power.bit_length() <= bits {
        power = power.mul_add(BASE, 0);
        digits += 1;
    }
    digits
}

/// Accumulates payload bits into one chunk, most significant bit first.
#[derive(Debug, Clone, Default)]
pub struct BitAccumulator {
    value: ChunkValue,
    len: usize,
}

impl BitAccumulator {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one bit.
    pub fn push(self, bit: bool) -> Self {
        Self {
            value: self.value.push_bit(bit),
            len: self.len + 1,
        }
    }

    /// Number of bits accumulated.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no bits have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Emit the chunk as `digits` characters and return a fresh accumulator.
    pub fn flush(self, digits: usize) -> Result<(String, Self)> {
        Ok((self.value.to_base92(digits)?, Self::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_add_and_div_rem() {
        let value = ChunkValue::from_u64(u64::MAX).mul_add(92, 7);
        assert_eq!(value.bit_length(), 71);

        let (quotient, rem) = value.div_rem(92);
        assert_eq!(rem, 7);
        assert_eq!(quotient.to_u64(), Some(u64::MAX));
    }

    #[test]
    fn test_push_bit_builds_msb_first() {
        let value = [true, false, true, true]
            .iter()
            .fold(ChunkValue::zero(), |v, &b| v.push_bit(b));
        assert_eq!(value.to_u64(), Some(0b1011));
        assert!(value.bit(0));
        assert!(!value.bit(2));
        assert!(value.bit(3));
        assert!(!value.bit(400));
    }

    #[test]
    fn test_base92_fixed_width() {
        let encoded = ChunkValue::from_u64(93).to_base92(3).unwrap();
        assert_eq!(encoded, " !!");

        let decoded = ChunkValue::from_base92(encoded.as_bytes(), 0).unwrap();
        assert_eq!(decoded.to_u64(), Some(93));
    }

    #[test]
    fn test_base92_overflow() {
        let result = ChunkValue::from_u64(92).to_base92(1);
        assert!(matches!(result, Err(CodecError::Overflow { width: 1, .. })));
        assert_eq!(ChunkValue::zero().to_base92(0).unwrap(), "");
    }

    #[test]
    fn test_base92_invalid_char() {
        let result = ChunkValue::from_base92(b"ab\\c", 10);
        assert!(matches!(
            result,
            Err(CodecError::InvalidChar {
                ch: '\\',
                position: 12
            })
        ));
    }

    #[test]
    fn test_base92_non_ascii_byte() {
        let result = ChunkValue::from_base92(&[b'!', 0xC3], 0);
        assert!(matches!(
            result,
            Err(CodecError::InvalidChar {
                ch: char::REPLACEMENT_CHARACTER,
                position: 1
            })
        ));
    }

    #[test]
    fn test_min_digits_for_bits() {
        assert_eq!(min_digits_for_bits(0), 0);
        assert_eq!(min_digits_for_bits(1), 1);
        assert_eq!(min_digits_for_bits(6), 1); // 64 <= 92
        assert_eq!(min_digits_for_bits(7), 2); // 128 > 92
        assert_eq!(min_digits_for_bits(13), 2); // 8192 <= 8464
        assert_eq!(min_digits_for_bits(14), 3);
        assert_eq!(min_digits_for_bits(1246), 191);
    }

    #[test]
    fn test_accumulator_flush() {
        let acc = BitAccumulator::new().push(true).push(false);
        assert_eq!(acc.len(), 2);

        let (digits, fresh) = acc.flush(1).unwrap();
        assert_eq!(digits, "#"); // value 2 -> third alphabet char
        assert!(fresh.is_empty());
    }
}
