//! Fixed-point filter coefficient codec.
//!
//! Biquad and IIR taps are signed 32-bit two's-complement values stored as
//! four consecutive registers, most significant byte first.

/// Bytes per coefficient slot.
pub const COEFFICIENT_BYTES: usize = 4;

/// Encode a coefficient into its register byte order (MSB first).
#[inline]
#[must_use]
pub const fn encode_coefficient(value: i32) -> [u8; COEFFICIENT_BYTES] {
    value.to_be_bytes()
}

/// Decode four register bytes (MSB first) into a coefficient.
///
/// Bit 31 of the first byte is the sign bit.
#[inline]
#[must_use]
pub const fn decode_coefficient(bytes: [u8; COEFFICIENT_BYTES]) -> i32 {
    i32::from_be_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_significant_byte_first() {
        assert_eq!(encode_coefficient(0x1234_5678), [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn negative_values_are_twos_complement() {
        assert_eq!(encode_coefficient(-1), [0xFF; 4]);
        assert_eq!(encode_coefficient(i32::MIN), [0x80, 0, 0, 0]);
        assert_eq!(decode_coefficient([0x80, 0, 0, 0]), i32::MIN);
        assert_eq!(decode_coefficient([0xFF, 0xFF, 0xFF, 0xFE]), -2);
    }

    #[test]
    fn unity_gain_numerator() {
        // 0x7FFF_FFFF is the largest representable tap (just under 1.0).
        assert_eq!(encode_coefficient(i32::MAX), [0x7F, 0xFF, 0xFF, 0xFF]);
        assert_eq!(decode_coefficient([0x7F, 0xFF, 0xFF, 0xFF]), i32::MAX);
    }
}
