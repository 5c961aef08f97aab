//! Per-channel analog and digital front end.
//!
//! Each channel owns a five-register block at `0x3C + channel × 5`. The enable
//! bit lives apart from the block, in IN_CH_EN.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::bitfield::{channel_bit, decode_channel_mask, encode_channel_mask, get_flag, set_flag};
use crate::config::{ChannelConfig, InputImpedance, InputSource};
use crate::device::{check_index, Taa3040};
use crate::error::Error;
use crate::page::Page;
use crate::registers::{
    channel_register, CH_AGCEN, CH_CFG0, CH_CFG1, CH_CFG2, CH_DC, CH_DVOL, CH_GAIN, CH_GCAL,
    CH_IMP, CH_INSRC, CH_INTYP, CH_PCAL, CH_CFG_STRIDE, REG_IN_CH_EN,
};
use crate::NUM_CHANNELS;

/// CH_CFG0..CH_CFG4 of one channel.
pub type ChannelRegisters = [u8; CH_CFG_STRIDE as usize];

/// Encode the block registers of one channel. `enabled` is not part of the
/// block.
pub fn encode_channel(cfg: &ChannelConfig) -> ChannelRegisters {
    let mut cfg0 = CH_INSRC.insert(0, cfg.source.bits());
    // CH_INTYP is 1 for line inputs.
    cfg0 = CH_INTYP.insert_flag(cfg0, !cfg.microphone);
    cfg0 = CH_DC.insert_flag(cfg0, cfg.dc_coupled);
    cfg0 = CH_IMP.insert(cfg0, cfg.impedance.bits());
    cfg0 = CH_AGCEN.insert_flag(cfg0, cfg.agc);

    [
        cfg0,
        CH_GAIN.insert(0, cfg.gain_db),
        CH_DVOL.insert(0, cfg.digital_volume),
        CH_GCAL.insert(0, cfg.gain_calibration),
        CH_PCAL.insert(0, cfg.phase_calibration),
    ]
}

/// Decode one channel from its block registers and enable bit.
pub fn decode_channel(regs: &ChannelRegisters, enabled: bool) -> ChannelConfig {
    let [cfg0, cfg1, cfg2, cfg3, cfg4] = *regs;
    ChannelConfig {
        enabled,
        source: InputSource::from_bits(CH_INSRC.extract(cfg0)),
        microphone: !CH_INTYP.extract_flag(cfg0),
        dc_coupled: CH_DC.extract_flag(cfg0),
        impedance: InputImpedance::from_bits(CH_IMP.extract(cfg0)),
        gain_db: CH_GAIN.extract(cfg1),
        digital_volume: CH_DVOL.extract(cfg2),
        agc: CH_AGCEN.extract_flag(cfg0),
        gain_calibration: CH_GCAL.extract(cfg3),
        phase_calibration: CH_PCAL.extract(cfg4),
    }
}

impl<I2C: I2c, EN: OutputPin> Taa3040<I2C, EN> {
    /// Program one channel, including its IN_CH_EN bit.
    pub fn write_channel_config(
        &mut self,
        channel: u8,
        cfg: &ChannelConfig,
    ) -> Result<(), Error<I2C::Error>> {
        let ch = check_index(channel, NUM_CHANNELS, Error::InvalidChannel)?;
        debug!("taa3040: write channel {} config", ch);
        let regs = encode_channel(cfg);
        self.on_page(Page::CONFIG, |dev| {
            dev.write_channel_block(ch, &regs)?;
            dev.modify_reg(REG_IN_CH_EN, |mask| set_flag(mask, channel_bit(ch), cfg.enabled))
        })
    }

    /// Read back one channel.
    pub fn read_channel_config(&mut self, channel: u8) -> Result<ChannelConfig, Error<I2C::Error>> {
        let ch = check_index(channel, NUM_CHANNELS, Error::InvalidChannel)?;
        debug!("taa3040: read channel {} config", ch);
        self.on_page(Page::CONFIG, |dev| {
            let regs = dev.read_channel_block(ch)?;
            let mask = dev.read_reg(REG_IN_CH_EN)?;
            Ok(decode_channel(&regs, get_flag(mask, channel_bit(ch))))
        })
    }

    /// Program all channels in order, then IN_CH_EN in one write.
    pub fn configure_all_channels(
        &mut self,
        channels: &[ChannelConfig; NUM_CHANNELS],
    ) -> Result<(), Error<I2C::Error>> {
        debug!("taa3040: write all channels");
        self.on_page(Page::CONFIG, |dev| {
            for (ch, cfg) in (0u8..).zip(channels.iter()) {
                dev.write_channel_block(ch, &encode_channel(cfg))?;
            }
            let enabled = channels.map(|c| c.enabled);
            dev.write_reg(REG_IN_CH_EN, encode_channel_mask(&enabled))
        })
    }

    /// Read back all channels.
    pub fn read_all_channels(
        &mut self,
    ) -> Result<[ChannelConfig; NUM_CHANNELS], Error<I2C::Error>> {
        debug!("taa3040: read all channels");
        self.on_page(Page::CONFIG, |dev| {
            let mut blocks = [ChannelRegisters::default(); NUM_CHANNELS];
            for (ch, block) in (0u8..).zip(blocks.iter_mut()) {
                *block = dev.read_channel_block(ch)?;
            }
            let enabled = decode_channel_mask(dev.read_reg(REG_IN_CH_EN)?);
            let mut out = [ChannelConfig::default(); NUM_CHANNELS];
            for ((cfg, block), &on) in out.iter_mut().zip(blocks.iter()).zip(enabled.iter()) {
                *cfg = decode_channel(block, on);
            }
            Ok(out)
        })
    }

    /// Set the analog gain of one channel in dB. Values wider than six bits
    /// are truncated.
    pub fn set_gain(&mut self, channel: u8, gain_db: u8) -> Result<(), Error<I2C::Error>> {
        let ch = check_index(channel, NUM_CHANNELS, Error::InvalidChannel)?;
        debug!("taa3040: channel {} gain {} dB", ch, gain_db);
        let field = CH_GAIN.at(channel_register(ch, CH_CFG1));
        self.on_page(Page::CONFIG, |dev| dev.write_field(field, gain_db))
    }

    /// Analog gain of one channel in dB.
    pub fn get_gain(&mut self, channel: u8) -> Result<u8, Error<I2C::Error>> {
        let ch = check_index(channel, NUM_CHANNELS, Error::InvalidChannel)?;
        let field = CH_GAIN.at(channel_register(ch, CH_CFG1));
        self.on_page(Page::CONFIG, |dev| dev.read_field(field))
    }

    /// Set the digital volume code of one channel.
    pub fn set_digital_volume(&mut self, channel: u8, volume: u8) -> Result<(), Error<I2C::Error>> {
        let ch = check_index(channel, NUM_CHANNELS, Error::InvalidChannel)?;
        debug!("taa3040: channel {} volume {}", ch, volume);
        self.on_page(Page::CONFIG, |dev| {
            dev.write_reg(channel_register(ch, CH_CFG2), volume)
        })
    }

    /// Digital volume code of one channel.
    pub fn get_digital_volume(&mut self, channel: u8) -> Result<u8, Error<I2C::Error>> {
        let ch = check_index(channel, NUM_CHANNELS, Error::InvalidChannel)?;
        self.on_page(Page::CONFIG, |dev| dev.read_reg(channel_register(ch, CH_CFG2)))
    }

    /// Turn the channel's AGC on or off, leaving the rest of CH_CFG0 alone.
    pub fn set_agc_enabled(&mut self, channel: u8, on: bool) -> Result<(), Error<I2C::Error>> {
        let ch = check_index(channel, NUM_CHANNELS, Error::InvalidChannel)?;
        debug!("taa3040: channel {} AGC {}", ch, on);
        let field = CH_AGCEN.at(channel_register(ch, CH_CFG0));
        self.on_page(Page::CONFIG, |dev| dev.write_field(field, u8::from(on)))
    }

    /// Whether the channel's AGC is on.
    pub fn is_agc_enabled(&mut self, channel: u8) -> Result<bool, Error<I2C::Error>> {
        let ch = check_index(channel, NUM_CHANNELS, Error::InvalidChannel)?;
        let field = CH_AGCEN.at(channel_register(ch, CH_CFG0));
        Ok(self.on_page(Page::CONFIG, |dev| dev.read_field(field))? != 0)
    }

    /// Set the channel's IN_CH_EN bit, leaving the other channels alone.
    pub fn set_channel_enabled(&mut self, channel: u8, on: bool) -> Result<(), Error<I2C::Error>> {
        let ch = check_index(channel, NUM_CHANNELS, Error::InvalidChannel)?;
        debug!("taa3040: channel {} enabled {}", ch, on);
        self.on_page(Page::CONFIG, |dev| {
            dev.modify_reg(REG_IN_CH_EN, |mask| set_flag(mask, channel_bit(ch), on))
        })
    }

    /// Whether the channel's IN_CH_EN bit is set.
    pub fn is_channel_enabled(&mut self, channel: u8) -> Result<bool, Error<I2C::Error>> {
        let ch = check_index(channel, NUM_CHANNELS, Error::InvalidChannel)?;
        let mask = self.on_page(Page::CONFIG, |dev| dev.read_reg(REG_IN_CH_EN))?;
        Ok(get_flag(mask, channel_bit(ch)))
    }

    fn write_channel_block(
        &mut self,
        ch: u8,
        regs: &ChannelRegisters,
    ) -> Result<(), Error<I2C::Error>> {
        for (offset, &byte) in (0u8..).zip(regs.iter()) {
            self.write_reg(channel_register(ch, offset), byte)?;
        }
        Ok(())
    }

    fn read_channel_block(&mut self, ch: u8) -> Result<ChannelRegisters, Error<I2C::Error>> {
        let mut regs = ChannelRegisters::default();
        for (offset, byte) in (0u8..).zip(regs.iter_mut()) {
            *byte = self.read_reg(channel_register(ch, offset))?;
        }
        Ok(regs)
    }
}
