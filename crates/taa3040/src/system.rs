//! Power, regulator, bias and PDM clock settings.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::bitfield::{decode_msb_first, encode_msb_first};
use crate::config::{
    DregKeepAlive, DynamicChannels, InputQuickCharge, MicBias, PdmClock, ReferenceVoltage,
    ShutdownMode, SystemConfig, VrefQuickCharge,
};
use crate::device::Taa3040;
use crate::error::Error;
use crate::page::Page;
use crate::registers::{
    ADC_FSCALE, ADC_PDZ, AREG_SELECT, DREG_KA_TIME, DYN_CH_PUPD_EN, DYN_MAXCH_SEL,
    I2C_BRDCAST_EN, INCAP_QCHG, MBIAS_VAL, MICBIAS_PDZ, PDMCLK_DIV, PDMDIN_EDGE, PLL_PDZ,
    REG_BIAS_CFG, REG_PDMCLK_CFG, REG_PDMIN_CFG, REG_PWR_CFG, REG_SHDN_CFG, REG_SLEEP_CFG,
    SHDN_CFG_DREG, VREF_QCHG,
};

/// Raw page-0 bytes carrying [`SystemConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemRegisters {
    /// SLEEP_CFG (0x02)
    pub sleep_cfg: u8,
    /// SHDN_CFG (0x05)
    pub shdn_cfg: u8,
    /// BIAS_CFG (0x3B)
    pub bias_cfg: u8,
    /// PDMCLK_CFG (0x1F)
    pub pdmclk_cfg: u8,
    /// PDMIN_CFG (0x20)
    pub pdmin_cfg: u8,
    /// PWR_CFG (0x75)
    pub pwr_cfg: u8,
}

impl SystemRegisters {
    /// Encode `cfg`. `sleep_cfg` is the current SLEEP_CFG so that the sleep
    /// bit and unrelated bits survive.
    pub fn encode(cfg: &SystemConfig, sleep_cfg: u8) -> Self {
        let mut sleep = AREG_SELECT.insert_flag(sleep_cfg, cfg.areg_internal);
        sleep = VREF_QCHG.insert(sleep, cfg.vref_quick_charge.bits());
        sleep = I2C_BRDCAST_EN.insert_flag(sleep, cfg.i2c_broadcast);

        let mut shdn = INCAP_QCHG.insert(0, cfg.input_quick_charge.bits());
        shdn = SHDN_CFG_DREG.insert(shdn, cfg.shutdown_mode.bits());
        shdn = DREG_KA_TIME.insert(shdn, cfg.dreg_keep_alive.bits());

        let bias = ADC_FSCALE.insert(MBIAS_VAL.insert(0, cfg.mic_bias.bits()), cfg.reference.bits());

        let mut pwr = MICBIAS_PDZ.insert_flag(0, cfg.mic_bias_enabled);
        pwr = ADC_PDZ.insert_flag(pwr, cfg.adc_enabled);
        pwr = PLL_PDZ.insert_flag(pwr, cfg.pll_enabled);
        pwr = DYN_CH_PUPD_EN.insert_flag(pwr, cfg.dynamic_power);
        pwr = DYN_MAXCH_SEL.insert(pwr, cfg.dynamic_channels.bits());

        Self {
            sleep_cfg: sleep,
            shdn_cfg: shdn,
            bias_cfg: bias,
            pdmclk_cfg: PDMCLK_DIV.insert(0, cfg.pdm_clock.bits()),
            pdmin_cfg: PDMDIN_EDGE.insert(0, encode_msb_first(&cfg.pdm_latch_edge)),
            pwr_cfg: pwr,
        }
    }

    /// Decode the configuration held in these bytes.
    pub fn decode(&self) -> SystemConfig {
        SystemConfig {
            areg_internal: AREG_SELECT.extract_flag(self.sleep_cfg),
            adc_enabled: ADC_PDZ.extract_flag(self.pwr_cfg),
            mic_bias_enabled: MICBIAS_PDZ.extract_flag(self.pwr_cfg),
            pll_enabled: PLL_PDZ.extract_flag(self.pwr_cfg),
            dynamic_power: DYN_CH_PUPD_EN.extract_flag(self.pwr_cfg),
            dynamic_channels: DynamicChannels::from_bits(DYN_MAXCH_SEL.extract(self.pwr_cfg)),
            shutdown_mode: ShutdownMode::from_bits(SHDN_CFG_DREG.extract(self.shdn_cfg)),
            dreg_keep_alive: DregKeepAlive::from_bits(DREG_KA_TIME.extract(self.shdn_cfg)),
            vref_quick_charge: VrefQuickCharge::from_bits(VREF_QCHG.extract(self.sleep_cfg)),
            input_quick_charge: InputQuickCharge::from_bits(INCAP_QCHG.extract(self.shdn_cfg)),
            i2c_broadcast: I2C_BRDCAST_EN.extract_flag(self.sleep_cfg),
            mic_bias: MicBias::from_bits(MBIAS_VAL.extract(self.bias_cfg)),
            reference: ReferenceVoltage::from_bits(ADC_FSCALE.extract(self.bias_cfg)),
            pdm_clock: PdmClock::from_bits(PDMCLK_DIV.extract(self.pdmclk_cfg)),
            pdm_latch_edge: decode_msb_first(PDMDIN_EDGE.extract(self.pdmin_cfg)),
        }
    }
}

impl<I2C: I2c, EN: OutputPin> Taa3040<I2C, EN> {
    /// Program power, regulator, bias and PDM clock settings.
    ///
    /// PWR_CFG is written last so blocks power up with their final settings.
    pub fn write_system_config(&mut self, cfg: &SystemConfig) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: write system config");
        self.on_page(Page::CONFIG, |dev| {
            let sleep_cfg = dev.read_reg(REG_SLEEP_CFG)?;
            let regs = SystemRegisters::encode(cfg, sleep_cfg);
            dev.write_reg(REG_SLEEP_CFG, regs.sleep_cfg)?;
            dev.write_reg(REG_SHDN_CFG, regs.shdn_cfg)?;
            dev.write_reg(REG_BIAS_CFG, regs.bias_cfg)?;
            dev.write_reg(REG_PDMCLK_CFG, regs.pdmclk_cfg)?;
            dev.write_reg(REG_PDMIN_CFG, regs.pdmin_cfg)?;
            dev.write_reg(REG_PWR_CFG, regs.pwr_cfg)
        })
    }

    /// Read back power, regulator, bias and PDM clock settings.
    pub fn read_system_config(&mut self) -> Result<SystemConfig, Error<I2C::Error>> {
        debug!("taa3040: read system config");
        self.on_page(Page::CONFIG, |dev| {
            let regs = SystemRegisters {
                sleep_cfg: dev.read_reg(REG_SLEEP_CFG)?,
                shdn_cfg: dev.read_reg(REG_SHDN_CFG)?,
                bias_cfg: dev.read_reg(REG_BIAS_CFG)?,
                pdmclk_cfg: dev.read_reg(REG_PDMCLK_CFG)?,
                pdmin_cfg: dev.read_reg(REG_PDMIN_CFG)?,
                pwr_cfg: dev.read_reg(REG_PWR_CFG)?,
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
    fn defaults_encode_to_expected_bytes() {
        let regs = SystemRegisters::encode(&SystemConfig::default(), 0);
        // Wait mode, 30 ms keep-alive, 2.5 ms input charge.
        assert_eq!(regs.shdn_cfg, 0b0000_0100);
        // Mic bias, ADC, PLL and dynamic power up; channels 1-2.
        assert_eq!(regs.pwr_cfg, 0b1111_0000);
        assert_eq!(regs.bias_cfg, 0);
        assert_eq!(regs.sleep_cfg, 0);
    }

    #[test]
    fn sleep_bit_survives_encode() {
        let regs = SystemRegisters::encode(&SystemConfig::default(), 0x01);
        assert_eq!(regs.sleep_cfg & 0x01, 0x01);
    }

    #[test]
    fn pdm_edges_are_msb_first() {
        let cfg = SystemConfig {
            pdm_latch_edge: [true, false, false, true],
            ..SystemConfig::default()
        };
        let regs = SystemRegisters::encode(&cfg, 0);
        assert_eq!(regs.pdmin_cfg, 0b1001_0000);
        assert_eq!(regs.decode().pdm_latch_edge, [true, false, false, true]);
    }

    #[test]
    fn every_field_reads_back() {
        let cfg = SystemConfig {
            areg_internal: true,
            adc_enabled: false,
            mic_bias_enabled: false,
            pll_enabled: true,
            dynamic_power: false,
            dynamic_channels: DynamicChannels::All,
            shutdown_mode: ShutdownMode::On,
            dreg_keep_alive: DregKeepAlive::Ms5,
            vref_quick_charge: VrefQuickCharge::Ms100,
            input_quick_charge: InputQuickCharge::Ms25,
            i2c_broadcast: true,
            mic_bias: MicBias::Avdd,
            reference: ReferenceVoltage::V1_375,
            pdm_clock: PdmClock::Mhz6_144,
            pdm_latch_edge: [false, true, true, false],
        };
        let mut dev = Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS);
        dev.write_system_config(&cfg).unwrap();
        assert_eq!(dev.read_system_config().unwrap(), cfg);
    }

    #[test]
    fn write_preserves_sleep_state() {
        let mut i2c = MockI2c::default();
        i2c.set_reg(0, REG_SLEEP_CFG, 0x01);
        let mut dev = Taa3040::new(i2c, DEFAULT_ADDRESS);
        dev.write_system_config(&SystemConfig::default()).unwrap();
        let (i2c, _) = dev.release();
        assert_eq!(i2c.reg(0, REG_SLEEP_CFG) & 0x01, 0x01);
    }

    #[test]
    fn power_register_is_written_last() {
        let mut dev = Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS);
        dev.write_system_config(&SystemConfig::default()).unwrap();
        let (i2c, _) = dev.release();
        assert_eq!(i2c.data_writes().last().map(|w| w.reg), Some(REG_PWR_CFG));
        assert_eq!(i2c.page_selects(), [0]);
    }
}
