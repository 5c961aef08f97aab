//! Whole-device configuration in one call.
//!
//! Domains are written in a fixed order: system, ASI, channels 1..8, GPIO,
//! interrupts, DSP (including all filter coefficients) and the mixer. The
//! first failure stops the sequence; whatever was written before it stays
//! written.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::config::DeviceConfig;
use crate::device::Taa3040;
use crate::error::Error;

impl<I2C: I2c, EN: OutputPin> Taa3040<I2C, EN> {
    /// Program every register domain from `cfg`.
    pub fn write_config(&mut self, cfg: &DeviceConfig) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: write device config");
        self.write_system_config(&cfg.system)?;
        self.write_asi_config(&cfg.asi)?;
        self.configure_all_channels(&cfg.channels)?;
        self.write_gpio_config(&cfg.gpio)?;
        self.write_interrupt_config(&cfg.interrupt)?;
        self.write_dsp_config(&cfg.dsp)?;
        self.write_mixer(&cfg.mixer)
    }

    /// Read every register domain back, in the same order as
    /// [`Taa3040::write_config`].
    pub fn read_config(&mut self) -> Result<DeviceConfig, Error<I2C::Error>> {
        debug!("taa3040: read device config");
        Ok(DeviceConfig {
            system: self.read_system_config()?,
            asi: self.read_asi_config()?,
            channels: self.read_all_channels()?,
            gpio: self.read_gpio_config()?,
            interrupt: self.read_interrupt_config()?,
            dsp: self.read_dsp_config()?,
            mixer: self.read_mixer()?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::{
        AsiFormat, BiquadCoefficients, ClockRole, GpiMode, GpoMode, InputImpedance, InputSource,
        InterruptPolarity, MicBias, SampleRate,
    };
    use crate::device::DEFAULT_ADDRESS;
    use crate::mock::MockI2c;
    use embedded_hal::i2c::ErrorKind;

    fn custom() -> DeviceConfig {
        let mut cfg = DeviceConfig::default();
        cfg.system.mic_bias = MicBias::Avdd;
        cfg.system.mic_bias_enabled = true;
        cfg.asi.format = AsiFormat::I2s;
        cfg.asi.role = ClockRole::Slave;
        cfg.asi.master.sample_rate = SampleRate::Khz96;
        cfg.asi.channels[3].slot = 17;
        cfg.channels[0].enabled = true;
        cfg.channels[0].gain_db = 30;
        cfg.channels[5].source = InputSource::DigitalPdm;
        cfg.channels[7].digital_volume = 0x40;
        cfg.gpio.gpi[2] = GpiMode::Pdm56;
        cfg.interrupt.polarity = InterruptPolarity::ActiveHigh;
        cfg.dsp.biquads[11] = BiquadCoefficients {
            n0: -1,
            n1: i32::MIN,
            n2: i32::MAX,
            d1: 0x0123_4567,
            d2: -0x0123_4567,
        };
        cfg.dsp.high_pass.d1 = 42;
        cfg.mixer.rows[4][1] = -5;
        cfg
    }

    #[test]
    fn default_round_trip() {
        let mut dev = Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS);
        dev.write_config(&DeviceConfig::default()).unwrap();
        assert_eq!(dev.read_config().unwrap(), DeviceConfig::default());
    }

    #[test]
    fn custom_round_trip() {
        let cfg = custom();
        let mut dev = Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS);
        dev.write_config(&cfg).unwrap();
        assert_eq!(dev.read_config().unwrap(), cfg);
    }

    #[test]
    fn undocumented_codes_round_trip() {
        let mut cfg = custom();
        cfg.asi.format = AsiFormat::from_bits(3);
        cfg.asi.master.sample_rate = SampleRate::from_bits(0xC);
        cfg.gpio.gpo[0].mode = GpoMode::from_bits(9);
        cfg.channels[2].impedance = InputImpedance::from_bits(3);
        let mut dev = Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS);
        dev.write_config(&cfg).unwrap();
        let back = dev.read_config().unwrap();
        assert_eq!(back, cfg);
        assert_eq!(back.asi.format.bits(), 3);
        assert_eq!(back.gpio.gpo[0].mode.bits(), 9);
    }

    #[test]
    fn ends_on_page_zero() {
        let mut dev = Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS);
        dev.write_config(&custom()).unwrap();
        let (i2c, _) = dev.release();
        assert_eq!(i2c.page, 0);
        assert_eq!(i2c.page_selects().last(), Some(&0));
    }

    #[test]
    fn stops_at_first_failure() {
        let cfg = custom();
        let mut dry_run = Taa3040::new(MockI2c::default(), DEFAULT_ADDRESS);
        dry_run.write_config(&cfg).unwrap();
        let total = dry_run.release().0.transactions;

        for k in 0..total {
            let mut dev = Taa3040::new(MockI2c::failing_at(k), DEFAULT_ADDRESS);
            assert_eq!(dev.write_config(&cfg), Err(Error::Bus(ErrorKind::Other)));
            let (i2c, _) = dev.release();
            assert_eq!(i2c.transactions, k + 1, "step {k}");
        }
    }
}
