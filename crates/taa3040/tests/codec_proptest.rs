//! Property-based tests for the register codecs.
//! Verifies the bit-level invariants for every input, not just fixed examples.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

mod common;

use common::RegisterFile;
use taa3040::bitfield::{field_mask, pack, unpack};
use taa3040::mixer::{decode_mixer_row, encode_mixer_row};
use taa3040::{
    channel_bit, decode_channel_mask, decode_coefficient, encode_channel_mask,
    encode_coefficient, Taa3040, DEFAULT_ADDRESS,
};

proptest::proptest! {
    /// Every i32 survives the 4-byte big-endian coefficient codec.
    #[test]
    fn coefficient_round_trip(value in proptest::num::i32::ANY) {
        assert_eq!(decode_coefficient(encode_coefficient(value)), value);
    }

    /// The first coefficient byte is the most significant one.
    #[test]
    fn coefficient_msb_first(value in proptest::num::i32::ANY) {
        let bytes = encode_coefficient(value);
        assert_eq!(bytes[0], value.to_be_bytes()[0]);
        assert_eq!(bytes[3], value.to_be_bytes()[3]);
    }

    /// Packing a value and unpacking it yields the value truncated to the
    /// field, and bits outside the field are untouched.
    #[test]
    fn pack_unpack(byte in 0u8..=255, value in 0u8..=255, shift in 0u8..8, width in 1u8..=8) {
        proptest::prop_assume!(shift + width <= 8);
        let mask = field_mask(shift, width);
        let packed = pack(byte, shift, mask, value);
        let value_mask = mask >> shift;
        assert_eq!(unpack(packed, shift, mask), value & value_mask);
        assert_eq!(packed & !mask, byte & !mask);
    }

    /// Out-of-range shifts and widths never panic, and a field that starts
    /// past bit 7 is empty.
    #[test]
    fn codec_is_total(byte in 0u8..=255, value in 0u8..=255, shift in 0u8..=255, width in 0u8..=255) {
        let mask = field_mask(shift, width);
        if shift >= 8 {
            assert_eq!(mask, 0);
            assert_eq!(pack(byte, shift, 0xFF, value), 0);
            assert_eq!(unpack(byte, shift, 0xFF), 0);
        }
        assert_eq!(pack(byte, shift, mask, value) & !mask, byte & !mask);
    }

    /// Channel masks are MSB first: channel 1 is bit 7.
    #[test]
    fn channel_mask_round_trip(mask in 0u8..=255) {
        let flags = decode_channel_mask(mask);
        assert_eq!(encode_channel_mask(&flags), mask);
        for (ch, &on) in (0u8..).zip(flags.iter()) {
            assert_eq!(on, mask & (1 << channel_bit(ch)) != 0);
        }
    }

    /// Mixer weights are stored as two's complement bytes.
    #[test]
    fn mixer_row_round_trip(row in proptest::array::uniform8(proptest::num::i8::ANY)) {
        let bytes = encode_mixer_row(&row);
        assert_eq!(decode_mixer_row(&bytes), row);
        for (b, w) in bytes.iter().zip(row.iter()) {
            assert_eq!(*b, w.to_be_bytes()[0]);
        }
    }

    /// Analog gain reads back unchanged on every channel, and the neighbour
    /// bits of CH_CFG1 survive.
    #[test]
    fn gain_round_trip(ch in 0u8..8, gain in 0u8..64, low in 0u8..4) {
        let mut bus = RegisterFile::default();
        let reg = 0x3D + ch * 5;
        bus.set_reg(0, reg, low);
        let mut adc = Taa3040::new(bus, DEFAULT_ADDRESS);
        adc.set_gain(ch, gain).unwrap();
        assert_eq!(adc.get_gain(ch).unwrap(), gain);
        let (bus, _) = adc.release();
        assert_eq!(bus.reg(0, reg) & 0b11, low);
    }

    /// Any biquad section reads back what was written.
    #[test]
    fn biquad_round_trip(section in 0u8..12, taps in proptest::array::uniform5(proptest::num::i32::ANY)) {
        let bq = taa3040::BiquadCoefficients::from_taps(taps);
        let mut adc = Taa3040::new(RegisterFile::default(), DEFAULT_ADDRESS);
        adc.write_biquad(section, &bq).unwrap();
        assert_eq!(adc.read_biquad(section).unwrap(), bq);
    }
}
