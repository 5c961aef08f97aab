//! Bit-field codec.
//!
//! Every configuration field on the TAA3040 lives inside a single byte. These
//! helpers pack a value into, or pull it out of, a byte given its shift and
//! mask. They are total: a value wider than its mask is silently truncated,
//! exactly as the register itself would truncate it, and a shift or width
//! that reaches past bit 7 selects nothing.

use crate::NUM_CHANNELS;

/// Build the in-byte mask for a field of `width` bits starting at `shift`.
///
/// `width` of 8 with `shift` 0 yields `0xFF`. A `width` of 8 or more covers
/// every bit from `shift` upward. Bits shifted past bit 7 are dropped, so a
/// `shift` of 8 or more yields 0.
#[inline]
#[must_use]
// Truncation intended: bits above 7 do not exist in the register.
#[allow(clippy::cast_possible_truncation)]
pub const fn field_mask(shift: u8, width: u8) -> u8 {
    let ones: u16 = match 1u16.checked_shl(width as u32) {
        Some(bit) => bit.wrapping_sub(1),
        None => u16::MAX,
    };
    match ones.checked_shl(shift as u32) {
        Some(mask) => mask as u8,
        None => 0,
    }
}

/// Clear the `mask` bits of `byte` and OR in `value << shift`, truncated to
/// `mask`.
///
/// A `shift` of 8 or more moves every bit of `value` out of the byte, so
/// only the clear takes effect.
#[inline]
#[must_use]
pub const fn pack(byte: u8, shift: u8, mask: u8, value: u8) -> u8 {
    let shifted = match value.checked_shl(shift as u32) {
        Some(v) => v,
        None => 0,
    };
    (byte & !mask) | (shifted & mask)
}

/// Extract the field selected by `mask` from `byte`, right-aligned.
///
/// A `shift` of 8 or more yields 0.
#[inline]
#[must_use]
pub const fn unpack(byte: u8, shift: u8, mask: u8) -> u8 {
    match (byte & mask).checked_shr(shift as u32) {
        Some(v) => v,
        None => 0,
    }
}

/// Set or clear a single bit.
#[inline]
#[must_use]
pub const fn set_flag(byte: u8, bit: u8, condition: bool) -> u8 {
    pack(byte, bit, field_mask(bit, 1), condition as u8)
}

/// Read a single bit.
#[inline]
#[must_use]
pub const fn get_flag(byte: u8, bit: u8) -> bool {
    unpack(byte, bit, field_mask(bit, 1)) != 0
}

/// Bit position of `channel` in an MSB-first channel mask.
///
/// The device puts channel 1 in bit 7 and channel 8 in bit 0, so the bit is
/// `NUM_CHANNELS - channel - 1`. `channel` must be below `NUM_CHANNELS`.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)] // NUM_CHANNELS == 8
pub const fn channel_bit(channel: u8) -> u8 {
    (NUM_CHANNELS as u8).wrapping_sub(channel).wrapping_sub(1)
}

/// Pack flags MSB-first: `flags[0]` lands in bit `N - 1`, the last flag in
/// bit 0. Used for channel masks (N = 8) and for the four-pin GPO/GPI and
/// PDM-edge nibbles.
#[must_use]
pub fn encode_msb_first<const N: usize>(flags: &[bool; N]) -> u8 {
    flags
        .iter()
        .fold(0u8, |byte, &on| byte.wrapping_shl(1) | u8::from(on))
}

/// Inverse of [`encode_msb_first`]. Bits at or above `N` are ignored.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // N never exceeds 8
pub fn decode_msb_first<const N: usize>(byte: u8) -> [bool; N] {
    let mut flags = [false; N];
    for (bit, flag) in (0..N).rev().zip(flags.iter_mut()) {
        *flag = get_flag(byte, bit as u8);
    }
    flags
}

/// Pack per-channel flags into an MSB-first channel mask
/// (IN_CH_EN, ASI_OUT_CH_EN, DEV_STS0).
#[must_use]
pub fn encode_channel_mask(flags: &[bool; NUM_CHANNELS]) -> u8 {
    encode_msb_first(flags)
}

/// Unpack an MSB-first channel mask.
#[must_use]
pub fn decode_channel_mask(byte: u8) -> [bool; NUM_CHANNELS] {
    decode_msb_first(byte)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn mask_covers_requested_bits() {
        assert_eq!(field_mask(0, 1), 0b0000_0001);
        assert_eq!(field_mask(6, 2), 0b1100_0000);
        assert_eq!(field_mask(2, 6), 0b1111_1100);
        assert_eq!(field_mask(0, 8), 0xFF);
        assert_eq!(field_mask(4, 4), 0xF0);
    }

    #[test]
    fn mask_saturates_instead_of_overflowing() {
        assert_eq!(field_mask(0, 16), 0xFF);
        assert_eq!(field_mask(0, 200), 0xFF);
        assert_eq!(field_mask(3, 9), 0b1111_1000);
        assert_eq!(field_mask(9, 1), 0);
        assert_eq!(field_mask(16, 8), 0);
        assert_eq!(field_mask(8, 1), 0);
        assert_eq!(field_mask(0, 0), 0);
    }

    #[test]
    fn shifts_past_the_byte_select_nothing() {
        // A shift of 8 must not wrap round to bit 0.
        assert_eq!(pack(0, 8, 0xFF, 1), 0);
        assert_eq!(pack(0xA5, 8, 0x0F, 0xFF), 0xA0);
        assert_eq!(pack(0, 200, 0xFF, 0xFF), 0);
        assert_eq!(unpack(0xFF, 8, 0xFF), 0);
        assert_eq!(unpack(0xFF, 255, 0xFF), 0);
        assert_eq!(set_flag(0x5A, 8, true), 0x5A);
        assert!(!get_flag(0xFF, 9));
    }

    #[test]
    fn pack_preserves_bits_outside_mask() {
        let byte = pack(0b1010_1010, 2, field_mask(2, 2), 0b01);
        assert_eq!(byte, 0b1010_0110);
    }

    #[test]
    fn pack_truncates_oversized_value() {
        // 0b111 does not fit a 2-bit field; only the low two bits land.
        let byte = pack(0, 4, field_mask(4, 2), 0b111);
        assert_eq!(byte, 0b0011_0000);
        assert_eq!(unpack(byte, 4, field_mask(4, 2)), 0b11);
    }

    #[test]
    fn unpack_ignores_neighbouring_bits() {
        assert_eq!(unpack(0b1111_0110, 1, field_mask(1, 2)), 0b11);
        assert_eq!(unpack(0b0000_1001, 1, field_mask(1, 2)), 0b00);
    }

    #[test]
    fn flags_set_and_clear() {
        let byte = set_flag(0, 7, true);
        assert_eq!(byte, 0x80);
        assert!(get_flag(byte, 7));
        assert!(!get_flag(byte, 6));
        assert_eq!(set_flag(0xFF, 3, false), 0b1111_0111);
    }

    #[test]
    fn pack_unpack_every_shift_and_width() {
        for width in 1u8..=8 {
            for shift in 0u8..=(8 - width) {
                let mask = field_mask(shift, width);
                for v in 0u8..=255 {
                    let max = field_mask(0, width);
                    let packed = pack(0, shift, mask, v);
                    assert_eq!(
                        unpack(packed, shift, mask),
                        v & max,
                        "shift {shift} width {width} value {v}"
                    );
                }
            }
        }
    }

    #[test]
    fn channel_zero_is_msb() {
        assert_eq!(channel_bit(0), 7);
        assert_eq!(channel_bit(7), 0);

        let mut flags = [false; NUM_CHANNELS];
        flags[0] = true;
        assert_eq!(encode_channel_mask(&flags), 0b1000_0000);

        let mut flags = [false; NUM_CHANNELS];
        flags[7] = true;
        assert_eq!(encode_channel_mask(&flags), 0b0000_0001);
    }

    #[test]
    fn channel_mask_agrees_with_channel_bit() {
        for ch in 0..NUM_CHANNELS as u8 {
            let mut flags = [false; NUM_CHANNELS];
            flags[usize::from(ch)] = true;
            assert_eq!(encode_channel_mask(&flags), 1 << channel_bit(ch));
        }
    }

    #[test]
    fn four_pin_nibble_puts_first_pin_in_bit_three() {
        assert_eq!(encode_msb_first(&[true, false, false, false]), 0b1000);
        assert_eq!(encode_msb_first(&[false, false, false, true]), 0b0001);
        assert_eq!(decode_msb_first::<4>(0b1111_0100), [false, true, false, false]);
    }

    #[test]
    fn channel_mask_round_trips() {
        for byte in 0u8..=255 {
            assert_eq!(encode_channel_mask(&decode_channel_mask(byte)), byte);
        }
    }
}
