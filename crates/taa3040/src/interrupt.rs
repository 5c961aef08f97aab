//! Interrupt pin behaviour, masks and latches.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::config::{InterruptConfig, InterruptEvent, InterruptPolarity};
use crate::device::Taa3040;
use crate::error::Error;
use crate::page::Page;
use crate::registers::{
    INT_EVENT, INT_LTCH_ASI, INT_LTCH_PLL, INT_MASK_ASI, INT_MASK_PLL, INT_POL, LTCH_READ_CFG,
    REG_INT_CFG, REG_INT_LTCH0, REG_INT_MASK0,
};

/// Raw page-0 bytes carrying [`InterruptConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterruptRegisters {
    /// INT_CFG (0x32)
    pub int_cfg: u8,
    /// INT_MASK0 (0x33)
    pub int_mask0: u8,
    /// INT_LTCH0 (0x36)
    pub int_ltch0: u8,
}

impl InterruptRegisters {
    /// Encode `cfg`.
    pub fn encode(cfg: &InterruptConfig) -> Self {
        let mut int_cfg = INT_POL.insert_flag(0, cfg.polarity.is_active_high());
        int_cfg = INT_EVENT.insert(int_cfg, cfg.event.bits());
        int_cfg = LTCH_READ_CFG.insert_flag(int_cfg, cfg.latch_read_unmasked);
        Self {
            int_cfg,
            int_mask0: INT_MASK_PLL.insert_flag(
                INT_MASK_ASI.insert_flag(0, cfg.mask_asi),
                cfg.mask_pll,
            ),
            int_ltch0: INT_LTCH_PLL.insert_flag(
                INT_LTCH_ASI.insert_flag(0, cfg.latch_asi),
                cfg.latch_pll,
            ),
        }
    }

    /// Decode the configuration held in these bytes.
    pub fn decode(&self) -> InterruptConfig {
        InterruptConfig {
            polarity: InterruptPolarity::from_active_high_bit(INT_POL.extract_flag(self.int_cfg)),
            event: InterruptEvent::from_bits(INT_EVENT.extract(self.int_cfg)),
            latch_read_unmasked: LTCH_READ_CFG.extract_flag(self.int_cfg),
            mask_asi: INT_MASK_ASI.extract_flag(self.int_mask0),
            mask_pll: INT_MASK_PLL.extract_flag(self.int_mask0),
            latch_asi: INT_LTCH_ASI.extract_flag(self.int_ltch0),
            latch_pll: INT_LTCH_PLL.extract_flag(self.int_ltch0),
        }
    }
}

impl<I2C: I2c, EN: OutputPin> Taa3040<I2C, EN> {
    /// Program interrupt behaviour, masks and latches.
    ///
    /// INT_LTCH0 is written last. The device treats it as read-only status,
    /// so only a register-file model keeps the latch bits.
    pub fn write_interrupt_config(
        &mut self,
        cfg: &InterruptConfig,
    ) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: write interrupt config");
        let regs = InterruptRegisters::encode(cfg);
        self.on_page(Page::CONFIG, |dev| {
            dev.write_reg(REG_INT_CFG, regs.int_cfg)?;
            dev.write_reg(REG_INT_MASK0, regs.int_mask0)?;
            dev.write_reg(REG_INT_LTCH0, regs.int_ltch0)
        })
    }

    /// Read back interrupt behaviour, masks and latches.
    ///
    /// INT_LTCH0 is read exactly once, after INT_CFG and INT_MASK0. Depending
    /// on `latch_read_unmasked`, that read may clear pending sources, so
    /// calling this twice can return different latch bits.
    pub fn read_interrupt_config(&mut self) -> Result<InterruptConfig, Error<I2C::Error>> {
        debug!("taa3040: read interrupt config");
        self.on_page(Page::CONFIG, |dev| {
            let regs = InterruptRegisters {
                int_cfg: dev.read_reg(REG_INT_CFG)?,
                int_mask0: dev.read_reg(REG_INT_MASK0)?,
                int_ltch0: dev.read_reg(REG_INT_LTCH0)?,
            };
            Ok(regs.decode())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::device::DEFAULT_ADDRESS;
    use crate::mock::MockI2c;

    #[test]
    fn defaults_are_all_zero() {
        assert_eq!(
            InterruptRegisters::encode(&InterruptConfig::default()),
            InterruptRegisters::default()
        );
    }

    #[test]
    fn bit_positions() {
        let cfg = InterruptConfig {
            polarity: InterruptPolarity::ActiveHigh,
            event: InterruptEvent::Pulse,
            latch_read_unmasked: true,
            mask_asi: true,
            mask_pll: false,
            latch_asi: false,
            latch_pll: true,
        };
        let regs = InterruptRegisters::encode(&cfg);
        assert_eq!(regs.int_cfg, 0b1110_0100);
        assert_eq!(regs.int_mask0, 0b1000_0000);
        assert_eq!(regs.int_ltch0, 0b0100_0000);
        assert_eq!(regs.decode(), cfg);
    }

    #[test]
    fn reserved_event_survives() {
        let regs = InterruptRegisters {
            int_cfg: 0b0010_0000,
            ..InterruptRegisters::default()
        };
        assert!(matches!(regs.decode().event, InterruptEvent::Reserved(c) if c.get() == 1));
        assert_eq!(InterruptRegisters::encode(&regs.decode()), regs);
    }

    #[test]
    fn device_round_trip() {
        let cfg = InterruptConfig {
            polarity: InterruptPolarity::ActiveHigh,
            event: InterruptEvent::Blink,
            mask_pll: true,
            latch_asi: true,
            ..InterruptConfig::default()
        };
        let mut dev = Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS);
        dev.write_interrupt_config(&cfg).unwrap();
        assert_eq!(dev.read_interrupt_config().unwrap(), cfg);
        let (i2c, _) = dev.release();
        // page select + 3 writes, page select + 3 reads
        assert_eq!(i2c.transactions, 8);
        assert_eq!(i2c.page_selects(), [0, 0]);
    }
}
