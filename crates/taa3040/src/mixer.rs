//! Output mixer matrix on page 4.
//!
//! Each row is eight signed weights in consecutive registers and moves as a
//! single auto-incrementing transfer.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::config::MixerMatrix;
use crate::device::{check_index, Taa3040};
use crate::error::Error;
use crate::page::Page;
use crate::registers::{mixer_row_register, MIX_WEIGHT};
use crate::{NUM_CHANNELS, NUM_MIXER_INPUTS};

/// One mixer row as register bytes.
pub type MixerRow = [i8; NUM_MIXER_INPUTS];

/// Encode a row of weights into register bytes (two's complement).
pub fn encode_mixer_row(row: &MixerRow) -> [u8; NUM_MIXER_INPUTS] {
    row.map(|w| MIX_WEIGHT.insert(0, u8::from_be_bytes(w.to_be_bytes())))
}

/// Decode register bytes into a row of weights.
pub fn decode_mixer_row(bytes: &[u8; NUM_MIXER_INPUTS]) -> MixerRow {
    bytes.map(|b| i8::from_be_bytes([MIX_WEIGHT.extract(b)]))
}

impl<I2C: I2c, EN: OutputPin> Taa3040<I2C, EN> {
    /// Program mixer row `row` (output channel 0–7).
    pub fn write_mixer_row(&mut self, row: u8, weights: &MixerRow) -> Result<(), Error<I2C::Error>> {
        let row = check_index(row, NUM_CHANNELS, Error::InvalidMixerRow)?;
        debug!("taa3040: write mixer row {}", row);
        let bytes = encode_mixer_row(weights);
        self.on_page(Page::MIXER_IIR, |dev| {
            dev.write_block(mixer_row_register(row), &bytes)
        })
    }

    /// Read back mixer row `row`.
    pub fn read_mixer_row(&mut self, row: u8) -> Result<MixerRow, Error<I2C::Error>> {
        let row = check_index(row, NUM_CHANNELS, Error::InvalidMixerRow)?;
        debug!("taa3040: read mixer row {}", row);
        let bytes = self.on_page(Page::MIXER_IIR, |dev| dev.read_block(mixer_row_register(row)))?;
        Ok(decode_mixer_row(&bytes))
    }

    /// Program the whole matrix, row 0 first.
    pub fn write_mixer(&mut self, matrix: &MixerMatrix) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: write mixer");
        self.on_page(Page::MIXER_IIR, |dev| {
            for (row, weights) in (0u8..).zip(matrix.rows.iter()) {
                dev.write_block(mixer_row_register(row), &encode_mixer_row(weights))?;
            }
            Ok(())
        })
    }

    /// Read back the whole matrix.
    pub fn read_mixer(&mut self) -> Result<MixerMatrix, Error<I2C::Error>> {
        debug!("taa3040: read mixer");
        self.on_page(Page::MIXER_IIR, |dev| {
            let mut rows = [[0i8; NUM_MIXER_INPUTS]; NUM_CHANNELS];
            for (row, weights) in (0u8..).zip(rows.iter_mut()) {
                *weights = decode_mixer_row(&dev.read_block(mixer_row_register(row))?);
            }
            Ok(MixerMatrix { rows })
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::device::DEFAULT_ADDRESS;
    use crate::mock::MockI2c;

    #[test]
    fn negative_weights_are_twos_complement() {
        let bytes = encode_mixer_row(&[-1, -128, 127, 0, 1, -2, 64, -64]);
        assert_eq!(bytes, [0xFF, 0x80, 0x7F, 0x00, 0x01, 0xFE, 0x40, 0xC0]);
        assert_eq!(decode_mixer_row(&bytes), [-1, -128, 127, 0, 1, -2, 64, -64]);
    }

    #[test]
    fn row_is_one_burst_at_its_stride() {
        let mut dev = Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS);
        dev.write_mixer_row(7, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let (i2c, _) = dev.release();
        // page 4, burst, page 0
        assert_eq!(i2c.transactions, 3);
        assert_eq!(i2c.reg(4, 0x08 + 56), 1);
        assert_eq!(i2c.reg(4, 0x08 + 63), 8);
    }

    #[test]
    fn matrix_round_trip() {
        let mut m = MixerMatrix::identity();
        m.rows[2][5] = -37;
        m.rows[7][0] = 100;
        let mut dev = Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS);
        dev.write_mixer(&m).unwrap();
        assert_eq!(dev.read_mixer().unwrap(), m);
        assert_eq!(dev.read_mixer_row(2).unwrap()[5], -37);
    }

    #[test]
    fn invalid_row_issues_no_traffic() {
        let mut dev = Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS);
        assert_eq!(dev.write_mixer_row(8, &[0; 8]), Err(Error::InvalidMixerRow(8)));
        assert_eq!(dev.read_mixer_row(9), Err(Error::InvalidMixerRow(9)));
        let (i2c, _) = dev.release();
        assert_eq!(i2c.transactions, 0);
    }
}
