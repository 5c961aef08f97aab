//! Decimation, high-pass, AGC and programmable filter coefficients.
//!
//! Biquad sections 0–5 live on page 2 and 6–11 on page 3, each section
//! occupying twenty bytes from 0x08. The first-order IIR sits on page 4.
//! Coefficients are written one byte at a time, MSB first.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::coefficient::{decode_coefficient, encode_coefficient, COEFFICIENT_BYTES};
use crate::config::{
    BiquadCoefficients, ChannelSumming, DecimationFilter, DspConfig, FirstOrderIir,
    HighPassFilter,
};
use crate::device::{check_index, Taa3040};
use crate::error::Error;
use crate::page::Page;
use crate::registers::{
    biquad_offset, biquad_page, biquad_tap_register, AGC_LVL, AGC_MAXGAIN, AGC_SEL, BIQUAD_CFG,
    BIQUADS_PER_PAGE, CH_SUM, DECI_FILT, DISABLE_SOFT_STEP, DVOL_GANG, HPF_SEL, REG_AGC_CFG0,
    REG_DSP_CFG0, REG_DSP_CFG1, REG_IIR_D1, REG_IIR_N0, REG_IIR_N1,
};
use crate::NUM_BIQUADS;

/// Where a biquad section lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BiquadLocation {
    /// Page holding the section.
    pub page: Page,
    /// Byte offset of N0 from the first coefficient register (0x08).
    pub offset: u8,
}

/// Resolve the page and offset of biquad `section`.
pub fn biquad_location<E>(section: u8) -> Result<BiquadLocation, Error<E>> {
    let section = check_index(section, NUM_BIQUADS, Error::InvalidBiquad)?;
    Ok(BiquadLocation {
        page: biquad_page(section),
        offset: biquad_offset(section),
    })
}

/// DSP_CFG0, DSP_CFG1 and AGC_CFG0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DspRegisters {
    /// DSP_CFG0 (0x6B)
    pub dsp_cfg0: u8,
    /// DSP_CFG1 (0x6C)
    pub dsp_cfg1: u8,
    /// AGC_CFG0 (0x70)
    pub agc_cfg0: u8,
}

impl DspRegisters {
    /// Encode the register part of `cfg`. Coefficients are not included.
    pub fn encode(cfg: &DspConfig) -> Self {
        let mut cfg0 = DECI_FILT.insert(0, cfg.decimation.bits());
        cfg0 = CH_SUM.insert(cfg0, cfg.summing.bits());
        cfg0 = HPF_SEL.insert(cfg0, cfg.hpf.bits());

        let mut cfg1 = DVOL_GANG.insert_flag(0, cfg.volume_ganged);
        cfg1 = BIQUAD_CFG.insert(cfg1, cfg.biquads_per_channel);
        cfg1 = DISABLE_SOFT_STEP.insert_flag(cfg1, !cfg.soft_stepping);
        cfg1 = AGC_SEL.insert_flag(cfg1, cfg.agc);

        Self {
            dsp_cfg0: cfg0,
            dsp_cfg1: cfg1,
            agc_cfg0: AGC_MAXGAIN.insert(AGC_LVL.insert(0, cfg.agc_level), cfg.agc_max_gain),
        }
    }

    /// Decode the register part of a [`DspConfig`], taking the coefficient
    /// banks from `biquads` and `high_pass`.
    pub fn decode(
        &self,
        biquads: [BiquadCoefficients; NUM_BIQUADS],
        high_pass: FirstOrderIir,
    ) -> DspConfig {
        DspConfig {
            volume_ganged: DVOL_GANG.extract_flag(self.dsp_cfg1),
            biquads_per_channel: BIQUAD_CFG.extract(self.dsp_cfg1),
            agc: AGC_SEL.extract_flag(self.dsp_cfg1),
            hpf: HighPassFilter::from_bits(HPF_SEL.extract(self.dsp_cfg0)),
            decimation: DecimationFilter::from_bits(DECI_FILT.extract(self.dsp_cfg0)),
            summing: ChannelSumming::from_bits(CH_SUM.extract(self.dsp_cfg0)),
            soft_stepping: !DISABLE_SOFT_STEP.extract_flag(self.dsp_cfg1),
            agc_level: AGC_LVL.extract(self.agc_cfg0),
            agc_max_gain: AGC_MAXGAIN.extract(self.agc_cfg0),
            biquads,
            high_pass,
        }
    }
}

impl<I2C: I2c, EN: OutputPin> Taa3040<I2C, EN> {
    /// Program biquad `section` (0–11).
    pub fn write_biquad(
        &mut self,
        section: u8,
        coefficients: &BiquadCoefficients,
    ) -> Result<(), Error<I2C::Error>> {
        let loc = biquad_location(section)?;
        debug!("taa3040: write biquad {} (page {} offset {})", section, loc.page.get(), loc.offset);
        self.on_page(loc.page, |dev| dev.write_biquad_taps(section, coefficients))
    }

    /// Read back biquad `section` (0–11).
    pub fn read_biquad(&mut self, section: u8) -> Result<BiquadCoefficients, Error<I2C::Error>> {
        let loc = biquad_location(section)?;
        debug!("taa3040: read biquad {}", section);
        self.on_page(loc.page, |dev| dev.read_biquad_taps(section))
    }

    /// Program the custom high-pass IIR.
    pub fn write_iir(&mut self, iir: &FirstOrderIir) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: write IIR");
        self.on_page(Page::MIXER_IIR, |dev| {
            dev.write_coefficient(REG_IIR_N0, iir.n0)?;
            dev.write_coefficient(REG_IIR_N1, iir.n1)?;
            dev.write_coefficient(REG_IIR_D1, iir.d1)
        })
    }

    /// Read back the custom high-pass IIR.
    pub fn read_iir(&mut self) -> Result<FirstOrderIir, Error<I2C::Error>> {
        debug!("taa3040: read IIR");
        self.on_page(Page::MIXER_IIR, |dev| {
            Ok(FirstOrderIir {
                n0: dev.read_coefficient(REG_IIR_N0)?,
                n1: dev.read_coefficient(REG_IIR_N1)?,
                d1: dev.read_coefficient(REG_IIR_D1)?,
            })
        })
    }

    /// Program DSP_CFG0/1 and AGC_CFG0, then all twelve biquads, then the IIR.
    pub fn write_dsp_config(&mut self, cfg: &DspConfig) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: write DSP config");
        let regs = DspRegisters::encode(cfg);
        self.on_page(Page::CONFIG, |dev| {
            dev.write_reg(REG_DSP_CFG0, regs.dsp_cfg0)?;
            dev.write_reg(REG_DSP_CFG1, regs.dsp_cfg1)?;
            dev.write_reg(REG_AGC_CFG0, regs.agc_cfg0)
        })?;

        let (low, high) = cfg.biquads.split_at(usize::from(BIQUADS_PER_PAGE));
        self.on_page(Page::BIQUAD_LOW, |dev| {
            for (section, bq) in (0u8..).zip(low.iter()) {
                dev.write_biquad_taps(section, bq)?;
            }
            Ok(())
        })?;
        self.on_page(Page::BIQUAD_HIGH, |dev| {
            for (section, bq) in (BIQUADS_PER_PAGE..).zip(high.iter()) {
                dev.write_biquad_taps(section, bq)?;
            }
            Ok(())
        })?;
        self.write_iir(&cfg.high_pass)
    }

    /// Read back the DSP registers, all biquads and the IIR.
    pub fn read_dsp_config(&mut self) -> Result<DspConfig, Error<I2C::Error>> {
        debug!("taa3040: read DSP config");
        let regs = self.on_page(Page::CONFIG, |dev| {
            Ok(DspRegisters {
                dsp_cfg0: dev.read_reg(REG_DSP_CFG0)?,
                dsp_cfg1: dev.read_reg(REG_DSP_CFG1)?,
                agc_cfg0: dev.read_reg(REG_AGC_CFG0)?,
            })
        })?;

        let mut biquads = [BiquadCoefficients::default(); NUM_BIQUADS];
        let (low, high) = biquads.split_at_mut(usize::from(BIQUADS_PER_PAGE));
        self.on_page(Page::BIQUAD_LOW, |dev| {
            for (section, bq) in (0u8..).zip(low.iter_mut()) {
                *bq = dev.read_biquad_taps(section)?;
            }
            Ok(())
        })?;
        self.on_page(Page::BIQUAD_HIGH, |dev| {
            for (section, bq) in (BIQUADS_PER_PAGE..).zip(high.iter_mut()) {
                *bq = dev.read_biquad_taps(section)?;
            }
            Ok(())
        })?;
        let high_pass = self.read_iir()?;
        Ok(regs.decode(biquads, high_pass))
    }

    /// Taps of one section on the already selected page.
    fn write_biquad_taps(
        &mut self,
        section: u8,
        coefficients: &BiquadCoefficients,
    ) -> Result<(), Error<I2C::Error>> {
        for (tap, value) in (0u8..).zip(coefficients.taps()) {
            self.write_coefficient(biquad_tap_register(section, tap), value)?;
        }
        Ok(())
    }

    fn read_biquad_taps(&mut self, section: u8) -> Result<BiquadCoefficients, Error<I2C::Error>> {
        let mut taps = [0i32; 5];
        for (tap, value) in (0u8..).zip(taps.iter_mut()) {
            *value = self.read_coefficient(biquad_tap_register(section, tap))?;
        }
        Ok(BiquadCoefficients::from_taps(taps))
    }

    /// One 4-byte coefficient, MSB first, one register write per byte.
    fn write_coefficient(&mut self, reg: u8, value: i32) -> Result<(), Error<I2C::Error>> {
        for (i, byte) in (0u8..).zip(encode_coefficient(value)) {
            self.write_reg(reg.wrapping_add(i), byte)?;
        }
        Ok(())
    }

    fn read_coefficient(&mut self, reg: u8) -> Result<i32, Error<I2C::Error>> {
        let mut bytes = [0u8; COEFFICIENT_BYTES];
        for (i, byte) in (0u8..).zip(bytes.iter_mut()) {
            *byte = self.read_reg(reg.wrapping_add(i))?;
        }
        Ok(decode_coefficient(bytes))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]
mod tests {
    use super::*;
    use crate::device::DEFAULT_ADDRESS;
    use crate::mock::MockI2c;

    fn device() -> Taa3040<MockI2c> {
        Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS)
    }

    #[test]
    fn biquad_locations() {
        let loc = biquad_location::<()>(0).unwrap();
        assert_eq!((loc.page, loc.offset), (Page::BIQUAD_LOW, 0));
        let loc = biquad_location::<()>(5).unwrap();
        assert_eq!((loc.page, loc.offset), (Page::BIQUAD_LOW, 100));
        let loc = biquad_location::<()>(6).unwrap();
        assert_eq!((loc.page, loc.offset), (Page::BIQUAD_HIGH, 0));
        let loc = biquad_location::<()>(11).unwrap();
        assert_eq!((loc.page, loc.offset), (Page::BIQUAD_HIGH, 100));
        assert_eq!(biquad_location::<()>(12), Err(Error::InvalidBiquad(12)));
    }

    #[test]
    fn default_dsp_registers() {
        let regs = DspRegisters::encode(&DspConfig::default());
        // Linear phase, no summing, Fs/500.
        assert_eq!(regs.dsp_cfg0, 0b0000_0010);
        // Soft stepping on (bit clear), AGC selected.
        assert_eq!(regs.dsp_cfg1, 0b0000_1000);
        assert_eq!(regs.agc_cfg0, 0xAD);
    }

    #[test]
    fn biquad_bytes_land_msb_first_on_the_right_page() {
        let mut dev = device();
        let bq = BiquadCoefficients {
            n0: 0x7FFF_FFFF,
            n1: -2,
            n2: 0x0102_0304,
            d1: 0,
            d2: i32::MIN,
        };
        dev.write_biquad(11, &bq).unwrap();
        let (i2c, _) = dev.release();
        // Section 11: page 3, 0x08 + 100.
        assert_eq!(i2c.reg(3, 0x6C), 0x7F);
        assert_eq!(i2c.reg(3, 0x6F), 0xFF);
        assert_eq!(i2c.reg(3, 0x70), 0xFF);
        assert_eq!(i2c.reg(3, 0x73), 0xFE);
        assert_eq!(i2c.reg(3, 0x74), 0x01);
        assert_eq!(i2c.reg(3, 0x7C), 0x80);
        assert_eq!(i2c.page_selects(), [3, 0]);
        // One register per transaction.
        assert_eq!(i2c.transactions, 2 + 20);
    }

    #[test]
    fn biquad_round_trip() {
        let mut dev = device();
        let bq = BiquadCoefficients { n0: 1, n1: -1, n2: i32::MAX, d1: i32::MIN, d2: 12345 };
        for section in [0u8, 5, 6, 11] {
            dev.write_biquad(section, &bq).unwrap();
            assert_eq!(dev.read_biquad(section).unwrap(), bq);
        }
        assert_eq!(dev.current_page(), Some(Page::CONFIG));
    }

    #[test]
    fn iir_on_page_four() {
        let mut dev = device();
        let iir = FirstOrderIir { n0: 0x1122_3344, n1: -5, d1: 0x7000_0000 };
        dev.write_iir(&iir).unwrap();
        assert_eq!(dev.read_iir().unwrap(), iir);
        let (i2c, _) = dev.release();
        assert_eq!(i2c.reg(4, REG_IIR_N0), 0x11);
        assert_eq!(i2c.reg(4, REG_IIR_N0 + 3), 0x44);
        assert_eq!(i2c.reg(4, REG_IIR_D1), 0x70);
    }

    #[test]
    fn dsp_config_round_trip() {
        let mut cfg = DspConfig {
            volume_ganged: true,
            biquads_per_channel: 3,
            agc: false,
            hpf: HighPassFilter::Custom,
            decimation: DecimationFilter::UltraLowLatency,
            summing: ChannelSumming::Quads,
            soft_stepping: false,
            agc_level: 15,
            agc_max_gain: 0,
            high_pass: FirstOrderIir { n0: 7, n1: 8, d1: 9 },
            ..DspConfig::default()
        };
        for (i, bq) in cfg.biquads.iter_mut().enumerate() {
            let i = i as i32;
            *bq = BiquadCoefficients { n0: i, n1: -i, n2: i << 20, d1: i * 1000, d2: -(i << 24) };
        }
        let mut dev = device();
        dev.write_dsp_config(&cfg).unwrap();
        assert_eq!(dev.read_dsp_config().unwrap(), cfg);
    }

    #[test]
    fn invalid_section_issues_no_traffic() {
        let mut dev = device();
        assert_eq!(
            dev.write_biquad(12, &BiquadCoefficients::default()),
            Err(Error::InvalidBiquad(12))
        );
        assert_eq!(dev.read_biquad(255), Err(Error::InvalidBiquad(255)));
        let (i2c, _) = dev.release();
        assert_eq!(i2c.transactions, 0);
    }
}
