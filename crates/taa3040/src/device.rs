//! TAA3040 device handle.
//!
//! Owns the I2C bus, the optional SHDNZ enable line and the last page written
//! to the page-select register. Domain operations live in their own modules
//! as further `impl` blocks on [`Taa3040`].

use core::convert::Infallible;
use core::ops::RangeInclusive;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::I2c;

use crate::error::Error;
use crate::page::Page;
use crate::registers::{self, Field, PAGE_SIZE, REG_PAGE_SELECT};
use crate::NUM_MIXER_INPUTS;

/// 7-bit address with both ADDR pins low.
pub const DEFAULT_ADDRESS: u8 = 0x4C;
/// Addresses selectable with the ADDR pins.
pub const ADDRESS_RANGE: RangeInclusive<u8> = 0x4C..=0x4F;

/// Stand-in for boards that tie SHDNZ high.
///
/// [`Taa3040::power_on`] and [`Taa3040::power_off`] succeed without effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoEnablePin;

impl digital::ErrorType for NoEnablePin {
    type Error = Infallible;
}

impl OutputPin for NoEnablePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// TAA3040 driver.
///
/// All operations take `&mut self`; sharing one device between tasks needs an
/// external lock or a bus-sharing wrapper.
#[derive(Debug)]
pub struct Taa3040<I2C, EN = NoEnablePin> {
    i2c: I2C,
    enable: EN,
    address: u8,
    page: Option<Page>,
}

impl<I2C> Taa3040<I2C, NoEnablePin> {
    /// Create a driver for a device with SHDNZ tied high.
    ///
    /// No bus traffic happens until the first operation.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self::with_enable_pin(i2c, address, NoEnablePin)
    }
}

impl<I2C, EN> Taa3040<I2C, EN> {
    /// Create a driver that controls SHDNZ through `enable`.
    ///
    /// The pin is left as it is; call [`Taa3040::power_on`] before talking to
    /// the device.
    pub fn with_enable_pin(i2c: I2C, address: u8, enable: EN) -> Self {
        Self {
            i2c,
            enable,
            address,
            page: None,
        }
    }

    /// Give back the bus and the enable pin.
    pub fn release(self) -> (I2C, EN) {
        (self.i2c, self.enable)
    }

    /// 7-bit I2C address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// The page last written to the page-select register, if known.
    ///
    /// Informational only: the driver selects the page again on every call.
    pub fn current_page(&self) -> Option<Page> {
        self.page
    }
}

impl<I2C: I2c, EN: OutputPin> Taa3040<I2C, EN> {
    /// Write `page` to the page-select register.
    ///
    /// Always writes, whatever page was selected before. On failure the page
    /// is unknown.
    pub fn select_page(&mut self, page: Page) -> Result<(), Error<I2C::Error>> {
        trace!("taa3040: select page {}", page.get());
        self.page = None;
        self.i2c
            .write(self.address, &[REG_PAGE_SELECT, page.get()])
            .map_err(|e| {
                warn!("taa3040: page select {} failed", page.get());
                Error::Bus(e)
            })?;
        self.page = Some(page);
        Ok(())
    }

    /// Run `f` on `page`, then return to page 0.
    ///
    /// Stops at the first error without touching the page again.
    pub(crate) fn on_page<T>(
        &mut self,
        page: Page,
        f: impl FnOnce(&mut Self) -> Result<T, Error<I2C::Error>>,
    ) -> Result<T, Error<I2C::Error>> {
        self.select_page(page)?;
        let out = f(self)?;
        if page != Page::CONFIG {
            self.select_page(Page::CONFIG)?;
        }
        Ok(out)
    }

    /// Single-byte write on the current page.
    pub(crate) fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(self.address, &[reg, value]).map_err(|e| {
            warn!("taa3040: write {:#x} failed", reg);
            Error::Bus(e)
        })
    }

    /// Single-byte read on the current page.
    pub(crate) fn read_reg(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|e| {
                warn!("taa3040: read {:#x} failed", reg);
                Error::Bus(e)
            })?;
        let [value] = buf;
        Ok(value)
    }

    /// Read-modify-write of one register on the current page.
    pub(crate) fn modify_reg(
        &mut self,
        reg: u8,
        f: impl FnOnce(u8) -> u8,
    ) -> Result<(), Error<I2C::Error>> {
        let current = self.read_reg(reg)?;
        self.write_reg(reg, f(current))
    }

    /// Read-modify-write of a single field on the current page.
    pub(crate) fn write_field(&mut self, field: Field, value: u8) -> Result<(), Error<I2C::Error>> {
        self.modify_reg(field.address, |byte| field.insert(byte, value))
    }

    /// Read a single field on the current page.
    pub(crate) fn read_field(&mut self, field: Field) -> Result<u8, Error<I2C::Error>> {
        Ok(field.extract(self.read_reg(field.address)?))
    }

    /// Eight consecutive registers in one auto-incrementing write.
    pub(crate) fn write_block(
        &mut self,
        reg: u8,
        data: &[u8; NUM_MIXER_INPUTS],
    ) -> Result<(), Error<I2C::Error>> {
        let mut buf = [0u8; NUM_MIXER_INPUTS + 1];
        if let Some((first, rest)) = buf.split_first_mut() {
            *first = reg;
            rest.copy_from_slice(data);
        }
        self.i2c.write(self.address, &buf).map_err(|e| {
            warn!("taa3040: block write {:#x} failed", reg);
            Error::Bus(e)
        })
    }

    /// Eight consecutive registers in one auto-incrementing read.
    pub(crate) fn read_block(
        &mut self,
        reg: u8,
    ) -> Result<[u8; NUM_MIXER_INPUTS], Error<I2C::Error>> {
        let mut buf = [0u8; NUM_MIXER_INPUTS];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|e| {
                warn!("taa3040: block read {:#x} failed", reg);
                Error::Bus(e)
            })?;
        Ok(buf)
    }

    /// Write any register on any page.
    ///
    /// `address` must be inside the page and must not be the page-select
    /// register; use [`Taa3040::select_page`] for that.
    pub fn write_register(
        &mut self,
        page: u8,
        address: u8,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        let page = Page::new(page)?;
        check_register(address)?;
        debug!(
            "taa3040: write page {} reg {:#x} = {:#x}",
            page.get(),
            address,
            value
        );
        self.on_page(page, |dev| dev.write_reg(address, value))
    }

    /// Read any register on any page.
    pub fn read_register(&mut self, page: u8, address: u8) -> Result<u8, Error<I2C::Error>> {
        let page = Page::new(page)?;
        check_register(address)?;
        let value = self.on_page(page, |dev| dev.read_reg(address))?;
        debug!(
            "taa3040: read page {} reg {:#x} = {:#x}",
            page.get(),
            address,
            value
        );
        Ok(value)
    }

    /// Software reset.
    ///
    /// Every register returns to its power-on value, including the page
    /// select, so the page is unknown afterwards. The device needs 1 ms
    /// before the next access.
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: software reset");
        self.select_page(Page::CONFIG)?;
        self.write_reg(registers::SW_RESET.address, registers::SW_RESET.insert_flag(0, true))?;
        self.page = None;
        Ok(())
    }

    /// Enter sleep mode. Other SLEEP_CFG bits are preserved.
    pub fn sleep(&mut self) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: sleep");
        self.set_awake(false)
    }

    /// Leave sleep mode. Other SLEEP_CFG bits are preserved.
    pub fn wake(&mut self) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: wake");
        self.set_awake(true)
    }

    fn set_awake(&mut self, awake: bool) -> Result<(), Error<I2C::Error>> {
        let field = registers::SLEEP_ENZ;
        self.on_page(Page::CONFIG, |dev| {
            dev.modify_reg(field.address, |byte| field.insert_flag(byte, awake))
        })
    }

    /// Drive SHDNZ high.
    pub fn power_on(&mut self) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: power on");
        self.enable.set_high().map_err(|_| Error::EnablePin)?;
        // A SHDNZ cycle resets the register file.
        self.page = None;
        Ok(())
    }

    /// Drive SHDNZ low.
    pub fn power_off(&mut self) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: power off");
        self.enable.set_low().map_err(|_| Error::EnablePin)?;
        self.page = None;
        Ok(())
    }
}

fn check_register<E>(address: u8) -> Result<(), Error<E>> {
    if address == REG_PAGE_SELECT || address >= PAGE_SIZE {
        Err(Error::InvalidRegister(address))
    } else {
        Ok(())
    }
}

/// Reject an index at or above `limit` with `err`.
pub(crate) fn check_index<E>(
    index: u8,
    limit: usize,
    err: fn(u8) -> Error<E>,
) -> Result<u8, Error<E>> {
    if usize::from(index) < limit {
        Ok(index)
    } else {
        Err(err(index))
    }
}
