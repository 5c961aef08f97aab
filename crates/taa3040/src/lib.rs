//! Register-level driver for the TAA3040 8-channel audio analog front end.
//!
//! The TAA3040 exposes its configuration as a byte-wide, page-addressed
//! register file behind I2C. This crate translates a typed configuration
//! model to and from that register file, bit-exactly.
//!
//! # Layers
//!
//! ```text
//! DeviceConfig snapshot (snapshot)
//!         ↓
//! Domain encoders / decoders (system, asi, channel, dsp, mixer, gpio,
//!                             interrupt, status)
//!         ↓
//! Bit-field codec (bitfield)   Coefficient codec (coefficient)
//!         ↓                           ↓
//! Register map (registers)  +  Page selector (page)
//!         ↓
//! embedded_hal::i2c::I2c transport
//! ```
//!
//! # Page discipline
//!
//! Register addresses are only unique within a page, and the page-select
//! register lives inside the chip where anything else on the bus can change
//! it. Every entry point therefore writes the page it needs before its first
//! access and returns to page 0 when it is done. The driver never trusts a
//! cached page.
//!
//! # Features
//!
//! - `std`: implement `std::error::Error` for [`Error`]
//! - `defmt`: `defmt::Format` derives and defmt log output
//! - `tracing`: log output through `tracing` (host builds)
//!
//! # Example
//!
//! ```no_run
//! use taa3040::{AsiFormat, DeviceConfig, Taa3040, DEFAULT_ADDRESS};
//!
//! fn bring_up<I: embedded_hal::i2c::I2c>(i2c: I) -> Result<(), taa3040::Error<I::Error>> {
//!     let mut adc = Taa3040::new(i2c, DEFAULT_ADDRESS);
//!     adc.reset()?;
//!     adc.wake()?;
//!
//!     let mut config = DeviceConfig::default();
//!     config.asi.format = AsiFormat::I2s;
//!     config.channels[0].enabled = true;
//!     adc.write_config(&config)?;
//!     Ok(())
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this register driver:
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // every fallible op returns the same Error<E>

#[macro_use]
mod fmt;

pub mod asi;
pub mod bitfield;
pub mod channel;
pub mod coefficient;
pub mod config;
pub mod device;
pub mod dsp;
pub mod error;
pub mod gpio;
pub mod interrupt;
pub mod mixer;
pub mod page;
pub mod registers;
pub mod snapshot;
pub mod status;
pub mod system;

#[cfg(test)]
mod mock;

pub use bitfield::{channel_bit, decode_channel_mask, encode_channel_mask};
pub use coefficient::{decode_coefficient, encode_coefficient};
pub use config::{
    AsiChannelConfig, AsiConfig, BiquadCoefficients, ChannelConfig, DeviceConfig, DspConfig,
    FirstOrderIir, GpioConfig, GpoConfig, InterruptConfig, MasterClockConfig, MixerMatrix,
    SystemConfig,
};
pub use config::{
    AsiFormat, AsiWordLength, ChannelSumming, ClockRatio, ClockRole,
    DecimationFilter, DregKeepAlive, DynamicChannels, GpiMode, GpoDrive, GpoMode,
    HighPassFilter, InputImpedance, InputQuickCharge, InputSource, InterruptEvent,
    InterruptPolarity, KeeperMode, MclkFrequency, MicBias, PdmClock, ReferenceVoltage,
    ReservedCode, SampleRate, ShutdownMode, VrefQuickCharge,
};
pub use device::{NoEnablePin, Taa3040, ADDRESS_RANGE, DEFAULT_ADDRESS};
pub use dsp::BiquadLocation;
pub use error::Error;
pub use page::Page;
pub use status::{DeviceMode, DeviceStatus};

/// Number of analog/PDM input channels.
pub const NUM_CHANNELS: usize = 8;
/// Number of general-purpose input pins.
pub const NUM_GPI: usize = 4;
/// Number of general-purpose output pins.
pub const NUM_GPO: usize = 4;
/// Number of programmable biquad sections.
pub const NUM_BIQUADS: usize = 12;
/// Number of inputs per mixer row.
pub const NUM_MIXER_INPUTS: usize = 8;
