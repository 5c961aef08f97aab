//! Device mode and channel power status.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::bitfield::decode_channel_mask;
use crate::device::Taa3040;
use crate::error::Error;
use crate::page::Page;
use crate::registers::{CH_PWR_STS, MODE_STS, REG_DEV_STS0, REG_DEV_STS1};
use crate::NUM_CHANNELS;

/// Operating mode reported in DEV_STS1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMode {
    /// Sleep or software shutdown.
    Sleep,
    /// Active with every channel powered down.
    Idle,
    /// Active with at least one channel recording.
    Active,
}

impl DeviceMode {
    /// MODE_STS code.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Sleep => 0b100,
            Self::Idle => 0b110,
            Self::Active => 0b111,
        }
    }

    /// Decode a MODE_STS code. Undocumented codes yield `None`.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b100 => Some(Self::Sleep),
            0b110 => Some(Self::Idle),
            0b111 => Some(Self::Active),
            _ => None,
        }
    }
}

/// Snapshot of DEV_STS0/DEV_STS1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceStatus {
    /// Operating mode.
    pub mode: DeviceMode,
    /// Per-channel power state, channel 1 first.
    pub channels_powered: [bool; NUM_CHANNELS],
}

impl DeviceStatus {
    /// Whether any channel is powered.
    pub fn any_channel_powered(&self) -> bool {
        self.channels_powered.iter().any(|&on| on)
    }
}

/// Decode the two status bytes.
pub fn decode_status<E>(dev_sts0: u8, dev_sts1: u8) -> Result<DeviceStatus, Error<E>> {
    let raw = MODE_STS.extract(dev_sts1);
    let Some(mode) = DeviceMode::from_bits(raw) else {
        warn!("taa3040: undocumented device mode {:#x}", raw);
        return Err(Error::InvalidDeviceMode(raw));
    };
    Ok(DeviceStatus {
        mode,
        channels_powered: decode_channel_mask(CH_PWR_STS.extract(dev_sts0)),
    })
}

impl<I2C: I2c, EN: OutputPin> Taa3040<I2C, EN> {
    /// Read the current mode and channel power state.
    pub fn read_status(&mut self) -> Result<DeviceStatus, Error<I2C::Error>> {
        let (sts0, sts1) = self.on_page(Page::CONFIG, |dev| {
            Ok((dev.read_reg(REG_DEV_STS0)?, dev.read_reg(REG_DEV_STS1)?))
        })?;
        debug!("taa3040: status {:#x} {:#x}", sts0, sts1);
        decode_status(sts0, sts1)
    }
}
