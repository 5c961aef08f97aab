//! GPO/GPI pin functions and levels.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::bitfield::{decode_msb_first, encode_msb_first, get_flag, set_flag};
use crate::config::{GpiMode, GpioConfig, GpoConfig, GpoDrive, GpoMode};
use crate::device::{check_index, Taa3040};
use crate::error::Error;
use crate::page::Page;
use crate::registers::{
    gpi_field, gpo_register, GPI1_CFG, GPI2_CFG, GPI3_CFG, GPI4_CFG, GPI_MON, GPO_CFG, GPO_DRV,
    GPO_VAL, REG_GPI_CFG0, REG_GPI_CFG1, REG_GPI_MON, REG_GPO_VAL,
};
use crate::{NUM_GPI, NUM_GPO};

/// Raw page-0 bytes carrying [`GpioConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpioRegisters {
    /// GPO_CFG0..GPO_CFG3 (0x22..0x25)
    pub gpo_cfg: [u8; NUM_GPO],
    /// GPI_CFG0 (0x2B), GPI1 and GPI2
    pub gpi_cfg0: u8,
    /// GPI_CFG1 (0x2C), GPI3 and GPI4
    pub gpi_cfg1: u8,
}

impl GpioRegisters {
    /// Encode `cfg`.
    pub fn encode(cfg: &GpioConfig) -> Self {
        let gpo_cfg = cfg
            .gpo
            .map(|pin| GPO_DRV.insert(GPO_CFG.insert(0, pin.mode.bits()), pin.drive.bits()));
        let [g1, g2, g3, g4] = cfg.gpi;
        Self {
            gpo_cfg,
            gpi_cfg0: GPI2_CFG.insert(GPI1_CFG.insert(0, g1.bits()), g2.bits()),
            gpi_cfg1: GPI4_CFG.insert(GPI3_CFG.insert(0, g3.bits()), g4.bits()),
        }
    }

    /// Decode the configuration held in these bytes.
    pub fn decode(&self) -> GpioConfig {
        GpioConfig {
            gpo: self.gpo_cfg.map(|byte| GpoConfig {
                mode: GpoMode::from_bits(GPO_CFG.extract(byte)),
                drive: GpoDrive::from_bits(GPO_DRV.extract(byte)),
            }),
            gpi: [
                GpiMode::from_bits(GPI1_CFG.extract(self.gpi_cfg0)),
                GpiMode::from_bits(GPI2_CFG.extract(self.gpi_cfg0)),
                GpiMode::from_bits(GPI3_CFG.extract(self.gpi_cfg1)),
                GpiMode::from_bits(GPI4_CFG.extract(self.gpi_cfg1)),
            ],
        }
    }
}

impl<I2C: I2c, EN: OutputPin> Taa3040<I2C, EN> {
    /// Program all pin functions.
    pub fn write_gpio_config(&mut self, cfg: &GpioConfig) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: write GPIO config");
        let regs = GpioRegisters::encode(cfg);
        self.on_page(Page::CONFIG, |dev| {
            for (pin, &byte) in (0u8..).zip(regs.gpo_cfg.iter()) {
                dev.write_reg(gpo_register(pin), byte)?;
            }
            dev.write_reg(REG_GPI_CFG0, regs.gpi_cfg0)?;
            dev.write_reg(REG_GPI_CFG1, regs.gpi_cfg1)
        })
    }

    /// Read back all pin functions.
    pub fn read_gpio_config(&mut self) -> Result<GpioConfig, Error<I2C::Error>> {
        debug!("taa3040: read GPIO config");
        self.on_page(Page::CONFIG, |dev| {
            let mut regs = GpioRegisters::default();
            for (pin, byte) in (0u8..).zip(regs.gpo_cfg.iter_mut()) {
                *byte = dev.read_reg(gpo_register(pin))?;
            }
            regs.gpi_cfg0 = dev.read_reg(REG_GPI_CFG0)?;
            regs.gpi_cfg1 = dev.read_reg(REG_GPI_CFG1)?;
            Ok(regs.decode())
        })
    }

    /// Change the function of one GPI pin, leaving its neighbour alone.
    pub fn set_gpi_mode(&mut self, pin: u8, mode: GpiMode) -> Result<(), Error<I2C::Error>> {
        let field = gpi_field(pin).ok_or(Error::InvalidPin(pin))?;
        debug!("taa3040: GPI {} mode {}", pin, mode.bits());
        self.on_page(Page::CONFIG, |dev| dev.write_field(field, mode.bits()))
    }

    /// Drive all four GPO levels. Only pins in [`GpoMode::Output`] follow.
    pub fn set_gpo_levels(&mut self, levels: [bool; NUM_GPO]) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: GPO levels {:#x}", encode_msb_first(&levels));
        self.on_page(Page::CONFIG, |dev| {
            dev.write_field(GPO_VAL, encode_msb_first(&levels))
        })
    }

    /// Drive one GPO level, leaving the others alone.
    pub fn set_gpo_level(&mut self, pin: u8, high: bool) -> Result<(), Error<I2C::Error>> {
        let pin = check_index(pin, NUM_GPO, Error::InvalidPin)?;
        debug!("taa3040: GPO {} level {}", pin, high);
        let bit = gpo_level_bit(pin);
        self.on_page(Page::CONFIG, |dev| {
            dev.modify_reg(REG_GPO_VAL, |byte| set_flag(byte, bit, high))
        })
    }

    /// Sample all four GPI levels.
    pub fn read_gpi_levels(&mut self) -> Result<[bool; NUM_GPI], Error<I2C::Error>> {
        let bits = self.on_page(Page::CONFIG, |dev| dev.read_field(GPI_MON))?;
        Ok(decode_msb_first(bits))
    }

    /// Sample one GPI level.
    pub fn read_gpi_level(&mut self, pin: u8) -> Result<bool, Error<I2C::Error>> {
        let pin = check_index(pin, NUM_GPI, Error::InvalidPin)?;
        let byte = self.on_page(Page::CONFIG, |dev| dev.read_reg(REG_GPI_MON))?;
        Ok(get_flag(byte, gpi_level_bit(pin)))
    }
}

/// GPO_VAL bit of a zero-based pin (GPO1 at the top of the field).
fn gpo_level_bit(pin: u8) -> u8 {
    GPO_VAL
        .shift
        .wrapping_add(GPO_VAL.width)
        .wrapping_sub(1)
        .wrapping_sub(pin)
}

/// GPI_MON bit of a zero-based pin.
fn gpi_level_bit(pin: u8) -> u8 {
    GPI_MON
        .shift
        .wrapping_add(GPI_MON.width)
        .wrapping_sub(1)
        .wrapping_sub(pin)
}
