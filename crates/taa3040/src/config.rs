//! Typed configuration model.
//!
//! Every register field the driver programs has a home here. Multi-bit fields
//! are enums whose discriminants are the register codes; each has a total
//! `from_bits` so a read-back never fails on an undocumented code. Undocumented
//! codes decode to `Reserved(code)` and encode back to the same raw bits.
//!
//! `Default` for every type reproduces the driver's power-on configuration.

use crate::bitfield::field_mask;
use crate::{NUM_BIQUADS, NUM_CHANNELS, NUM_GPI, NUM_GPO, NUM_MIXER_INPUTS};

/// Register code without a documented meaning.
///
/// Only [`from_bits`](AsiFormat::from_bits) produces one, so the code is
/// always inside the field and never collides with a documented setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReservedCode(u8);

impl ReservedCode {
    /// Raw register code.
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Declares a register-code enum with a `Reserved(ReservedCode)` catch-all.
macro_rules! register_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $width:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Code without a documented meaning, kept verbatim.
            Reserved(ReservedCode),
        }

        impl $name {
            /// Field width in bits.
            pub const WIDTH: u8 = $width;

            /// Register code for this setting.
            pub const fn bits(self) -> u8 {
                match self {
                    $( Self::$variant => $value, )+
                    Self::Reserved(code) => code.0,
                }
            }

            /// Decode a register code. Bits above the field width are ignored.
            pub const fn from_bits(bits: u8) -> Self {
                match bits & field_mask(0, $width) {
                    $( $value => Self::$variant, )+
                    other => Self::Reserved(ReservedCode(other)),
                }
            }
        }
    };
}

// ── System / power ──────────────────────────────────────────────────────────

register_enum! {
    /// VREF quick-charge duration after wake.
    pub enum VrefQuickCharge: 2 {
        /// 3.5 ms
        Us3500 = 0,
        /// 10 ms
        Ms10 = 1,
        /// 50 ms
        Ms50 = 2,
        /// 100 ms
        Ms100 = 3,
    }
}

register_enum! {
    /// Input coupling capacitor quick-charge duration.
    pub enum InputQuickCharge: 2 {
        /// 2.5 ms
        Us2500 = 0,
        /// 12.5 ms
        Us12500 = 1,
        /// 25 ms
        Ms25 = 2,
        /// 50 ms
        Ms50 = 3,
    }
}

register_enum! {
    /// What the digital regulator does when the device shuts down.
    pub enum ShutdownMode: 2 {
        /// DREG powers down with the device.
        Off = 0,
        /// DREG stays up for the keep-alive time, then powers down.
        Wait = 1,
        /// DREG stays up.
        On = 2,
    }
}

register_enum! {
    /// DREG keep-alive time in [`ShutdownMode::Wait`].
    pub enum DregKeepAlive: 2 {
        /// 30 ms
        Ms30 = 0,
        /// 25 ms
        Ms25 = 1,
        /// 10 ms
        Ms10 = 2,
        /// 5 ms
        Ms5 = 3,
    }
}

register_enum! {
    /// PDM clock output frequency.
    pub enum PdmClock: 2 {
        /// 3.072 MHz
        Mhz3_072 = 0,
        /// 1.536 MHz
        Mhz1_536 = 1,
        /// 768 kHz
        Khz768 = 2,
        /// 6.144 MHz
        Mhz6_144 = 3,
    }
}

register_enum! {
    /// Channels eligible for dynamic power-up.
    pub enum DynamicChannels: 2 {
        /// Channels 1 and 2.
        Ch1To2 = 0,
        /// Channels 1 to 4.
        Ch1To4 = 1,
        /// Channels 1 to 6.
        Ch1To6 = 2,
        /// All eight channels.
        All = 3,
    }
}

register_enum! {
    /// Microphone bias voltage.
    pub enum MicBias: 3 {
        /// Equal to VREF.
        Vref = 0,
        /// VREF × 1.096.
        VrefScaled = 1,
        /// Tied to AVDD.
        Avdd = 2,
    }
}

register_enum! {
    /// ADC full-scale reference voltage.
    pub enum ReferenceVoltage: 2 {
        /// 2.75 V (2 Vrms differential full scale).
        V2_75 = 0,
        /// 2.5 V.
        V2_5 = 1,
        /// 1.375 V.
        V1_375 = 2,
    }
}

/// Power, regulator and reference settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemConfig {
    /// Use the internal AREG regulator (3.3 V AVDD supply).
    pub areg_internal: bool,
    /// Power up the ADC.
    pub adc_enabled: bool,
    /// Power up the microphone bias.
    pub mic_bias_enabled: bool,
    /// Power up the PLL.
    pub pll_enabled: bool,
    /// Power channels up and down as they are enabled.
    pub dynamic_power: bool,
    /// Channels covered by dynamic power-up.
    pub dynamic_channels: DynamicChannels,
    /// Digital regulator behaviour on shutdown.
    pub shutdown_mode: ShutdownMode,
    /// DREG keep-alive in [`ShutdownMode::Wait`].
    pub dreg_keep_alive: DregKeepAlive,
    /// VREF quick-charge duration.
    pub vref_quick_charge: VrefQuickCharge,
    /// Input capacitor quick-charge duration.
    pub input_quick_charge: InputQuickCharge,
    /// Respond to the I2C broadcast address.
    pub i2c_broadcast: bool,
    /// Microphone bias voltage.
    pub mic_bias: MicBias,
    /// ADC full-scale reference.
    pub reference: ReferenceVoltage,
    /// PDM clock frequency.
    pub pdm_clock: PdmClock,
    /// Latch PDM data on the negative edge, per channel pair (1-2, 3-4, 5-6, 7-8).
    pub pdm_latch_edge: [bool; NUM_CHANNELS / 2],
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            areg_internal: false,
            adc_enabled: true,
            mic_bias_enabled: true,
            pll_enabled: true,
            dynamic_power: true,
            dynamic_channels: DynamicChannels::Ch1To2,
            shutdown_mode: ShutdownMode::Wait,
            dreg_keep_alive: DregKeepAlive::Ms30,
            vref_quick_charge: VrefQuickCharge::Us3500,
            input_quick_charge: InputQuickCharge::Us2500,
            i2c_broadcast: false,
            mic_bias: MicBias::Vref,
            reference: ReferenceVoltage::V2_75,
            pdm_clock: PdmClock::Mhz3_072,
            pdm_latch_edge: [false; NUM_CHANNELS / 2],
        }
    }
}

// ── Audio serial interface ──────────────────────────────────────────────────

register_enum! {
    /// ASI frame protocol.
    pub enum AsiFormat: 2 {
        /// Time-division multiplexed.
        Tdm = 0,
        /// Philips I2S.
        I2s = 1,
        /// Left-justified.
        LeftJustified = 2,
    }
}

register_enum! {
    /// ASI slot word length.
    pub enum AsiWordLength: 2 {
        /// 16-bit words.
        Bits16 = 0,
        /// 20-bit words.
        Bits20 = 1,
        /// 24-bit words.
        Bits24 = 2,
        /// 32-bit words.
        Bits32 = 3,
    }
}

register_enum! {
    /// Bus keeper behaviour after the LSB of a slot.
    pub enum KeeperMode: 2 {
        /// No keeper.
        Disabled = 0,
        /// Keeper always on.
        Enabled = 1,
        /// Keeper for one BCLK cycle.
        OneCycle = 2,
        /// Keeper for one and a half BCLK cycles.
        OneAndHalfCycles = 3,
    }
}

register_enum! {
    /// Sample rate generated in master mode.
    pub enum SampleRate: 4 {
        /// 8 kHz (7.35 kHz in the 44.1 kHz family).
        Khz8 = 0,
        /// 16 kHz
        Khz16 = 1,
        /// 24 kHz
        Khz24 = 2,
        /// 32 kHz
        Khz32 = 3,
        /// 48 kHz
        Khz48 = 4,
        /// 96 kHz
        Khz96 = 5,
        /// 192 kHz
        Khz192 = 6,
        /// 384 kHz
        Khz384 = 7,
        /// 768 kHz
        Khz768 = 8,
    }
}

register_enum! {
    /// MCLK to FSYNC ratio in master mode.
    pub enum ClockRatio: 4 {
        /// 64 × FSYNC
        Ratio64 = 0,
        /// 256 × FSYNC
        Ratio256 = 1,
        /// 384 × FSYNC
        Ratio384 = 2,
        /// 512 × FSYNC
        Ratio512 = 3,
        /// 768 × FSYNC
        Ratio768 = 4,
        /// 1024 × FSYNC
        Ratio1024 = 5,
        /// 1536 × FSYNC
        Ratio1536 = 6,
        /// 2304 × FSYNC
        Ratio2304 = 7,
    }
}

register_enum! {
    /// MCLK input frequency when the PLL reference is MCLK.
    pub enum MclkFrequency: 3 {
        /// 12.000 MHz
        Mhz12 = 0,
        /// 12.288 MHz
        Mhz12_288 = 1,
        /// 13.000 MHz
        Mhz13 = 2,
        /// 16.000 MHz
        Mhz16 = 3,
        /// 19.200 MHz
        Mhz19_2 = 4,
        /// 19.680 MHz
        Mhz19_68 = 5,
        /// 24.000 MHz
        Mhz24 = 6,
        /// 24.576 MHz
        Mhz24_576 = 7,
    }
}

/// Which side drives BCLK and FSYNC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockRole {
    /// The host drives the clocks.
    Slave,
    /// The TAA3040 drives the clocks.
    Master,
}

impl ClockRole {
    /// `MST_SLV_CFG` bit value.
    pub const fn is_master(self) -> bool {
        matches!(self, Self::Master)
    }

    /// Decode the `MST_SLV_CFG` bit.
    pub const fn from_master_bit(master: bool) -> Self {
        if master {
            Self::Master
        } else {
            Self::Slave
        }
    }
}

/// Clock generation settings (MST_CFG0 / MST_CFG1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MasterClockConfig {
    /// Sample rate in master mode.
    pub sample_rate: SampleRate,
    /// MCLK to FSYNC ratio.
    pub ratio: ClockRatio,
    /// MCLK frequency.
    pub mclk: MclkFrequency,
    /// Derive the clock tree automatically from the incoming clocks.
    pub auto_clock: bool,
    /// Keep the PLL off while auto clock configuration is active.
    pub pll_disabled_in_auto: bool,
    /// Gate BCLK and FSYNC.
    pub gate_clocks: bool,
    /// Sample rate is a multiple of 48 kHz (otherwise 44.1 kHz).
    pub family_48k: bool,
}

impl Default for MasterClockConfig {
    fn default() -> Self {
        Self {
            sample_rate: SampleRate::Khz48,
            ratio: ClockRatio::Ratio256,
            mclk: MclkFrequency::Mhz12_288,
            auto_clock: true,
            pll_disabled_in_auto: false,
            gate_clocks: false,
            family_48k: true,
        }
    }
}

/// Output slot of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AsiChannelConfig {
    /// Transmit this channel on the ASI.
    pub enabled: bool,
    /// Transmit on the secondary output (GPO) instead of SDOUT.
    pub secondary_output: bool,
    /// Slot number, 0–63 (bits above 5 are dropped).
    pub slot: u8,
}

/// Audio serial interface framing and clocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AsiConfig {
    /// Frame protocol.
    pub format: AsiFormat,
    /// Slot word length.
    pub word_length: AsiWordLength,
    /// Clock master or slave.
    pub role: ClockRole,
    /// Invert FSYNC.
    pub fsync_inverted: bool,
    /// Invert BCLK.
    pub bclk_inverted: bool,
    /// Transmit on the opposite BCLK edge.
    pub tx_edge: bool,
    /// Drive unused slot cycles Hi-Z instead of zeros.
    pub tx_fill_hi_z: bool,
    /// Hi-Z for half a cycle after each LSB.
    pub lsb_hi_z: bool,
    /// Bus keeper after each LSB.
    pub keeper: KeeperMode,
    /// BCLK cycles between FSYNC and slot 0, 0–31.
    pub tx_offset: u8,
    /// Daisy-chain several devices on one SDOUT.
    pub daisy_chain: bool,
    /// Detect ASI clock errors.
    pub error_detection: bool,
    /// Recover automatically from ASI clock errors.
    pub error_recovery: bool,
    /// Clock generation.
    pub master: MasterClockConfig,
    /// Per-channel slot mapping.
    pub channels: [AsiChannelConfig; NUM_CHANNELS],
}

impl Default for AsiConfig {
    fn default() -> Self {
        let mut channels = [AsiChannelConfig::default(); NUM_CHANNELS];
        for (slot, ch) in (0u8..).zip(channels.iter_mut()) {
            ch.slot = slot;
        }
        Self {
            format: AsiFormat::Tdm,
            word_length: AsiWordLength::Bits24,
            role: ClockRole::Master,
            fsync_inverted: false,
            bclk_inverted: false,
            tx_edge: false,
            tx_fill_hi_z: false,
            lsb_hi_z: false,
            keeper: KeeperMode::Disabled,
            tx_offset: 0,
            daisy_chain: false,
            error_detection: true,
            error_recovery: true,
            master: MasterClockConfig::default(),
            channels,
        }
    }
}

// ── Channel front end ───────────────────────────────────────────────────────

register_enum! {
    /// Input source of a channel.
    pub enum InputSource: 2 {
        /// Differential analog input.
        AnalogDifferential = 0,
        /// Single-ended analog input.
        AnalogSingleEnded = 1,
        /// Digital microphone (PDM).
        DigitalPdm = 2,
    }
}

register_enum! {
    /// Analog input impedance.
    pub enum InputImpedance: 2 {
        /// 2.5 kΩ
        K2_5 = 0,
        /// 10 kΩ
        K10 = 1,
        /// 20 kΩ
        K20 = 2,
    }
}

/// One input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// Channel enabled in IN_CH_EN.
    pub enabled: bool,
    /// Input source.
    pub source: InputSource,
    /// Microphone input (otherwise line input).
    pub microphone: bool,
    /// DC-coupled input (otherwise AC-coupled).
    pub dc_coupled: bool,
    /// Input impedance.
    pub impedance: InputImpedance,
    /// Analog gain in dB, 0–42.
    pub gain_db: u8,
    /// Digital volume code. 0xC9 is 0 dB.
    pub digital_volume: u8,
    /// Automatic gain control on this channel.
    pub agc: bool,
    /// Gain calibration code, 0–15. 8 is 0 dB.
    pub gain_calibration: u8,
    /// Phase calibration in modulator clock cycles.
    pub phase_calibration: u8,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            source: InputSource::AnalogDifferential,
            microphone: true,
            dc_coupled: false,
            impedance: InputImpedance::K2_5,
            gain_db: 0,
            digital_volume: 0xC9,
            agc: false,
            gain_calibration: 8,
            phase_calibration: 0,
        }
    }
}

// ── DSP ─────────────────────────────────────────────────────────────────────

register_enum! {
    /// Decimation filter response.
    pub enum DecimationFilter: 2 {
        /// Linear phase.
        LinearPhase = 0,
        /// Low latency.
        LowLatency = 1,
        /// Ultra-low latency.
        UltraLowLatency = 2,
    }
}

register_enum! {
    /// Channel summing for SNR improvement.
    pub enum ChannelSumming: 2 {
        /// No summing.
        None = 0,
        /// Sum adjacent pairs.
        Pairs = 1,
        /// Sum groups of four.
        Quads = 2,
    }
}

register_enum! {
    /// High-pass filter after decimation.
    pub enum HighPassFilter: 2 {
        /// Programmable first-order IIR.
        Custom = 0,
        /// Corner at Fs / 4000.
        FsOver4000 = 1,
        /// Corner at Fs / 500.
        FsOver500 = 2,
        /// Corner at Fs / 125.
        FsOver125 = 3,
    }
}

/// One biquad section.
///
/// H(z) = (N0 + 2·N1·z⁻¹ + N2·z⁻²) / (2³¹ − 2·D1·z⁻¹ − D2·z⁻²)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BiquadCoefficients {
    /// N0
    pub n0: i32,
    /// N1
    pub n1: i32,
    /// N2
    pub n2: i32,
    /// D1
    pub d1: i32,
    /// D2
    pub d2: i32,
}

impl BiquadCoefficients {
    /// Taps in register order.
    pub const fn taps(&self) -> [i32; 5] {
        [self.n0, self.n1, self.n2, self.d1, self.d2]
    }

    /// Build from taps in register order.
    pub const fn from_taps(taps: [i32; 5]) -> Self {
        let [n0, n1, n2, d1, d2] = taps;
        Self { n0, n1, n2, d1, d2 }
    }
}

/// First-order IIR used by [`HighPassFilter::Custom`].
///
/// H(z) = (N0 + N1·z⁻¹) / (2³¹ − D1·z⁻¹)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirstOrderIir {
    /// N0
    pub n0: i32,
    /// N1
    pub n1: i32,
    /// D1
    pub d1: i32,
}

/// Signal-chain processing shared by all channels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DspConfig {
    /// All channels follow channel 1's digital volume.
    pub volume_ganged: bool,
    /// Biquads per channel, 0–3.
    pub biquads_per_channel: u8,
    /// AGC algorithm enabled globally.
    pub agc: bool,
    /// High-pass corner selection.
    pub hpf: HighPassFilter,
    /// Decimation filter response.
    pub decimation: DecimationFilter,
    /// Channel summing.
    pub summing: ChannelSumming,
    /// Ramp volume changes.
    pub soft_stepping: bool,
    /// AGC target level code, 0–15 (−6 dB to −36 dB).
    pub agc_level: u8,
    /// AGC maximum gain code, 0–13 (3 dB to 42 dB).
    pub agc_max_gain: u8,
    /// Biquad bank.
    pub biquads: [BiquadCoefficients; NUM_BIQUADS],
    /// Custom high-pass IIR.
    pub high_pass: FirstOrderIir,
}

impl Default for DspConfig {
    fn default() -> Self {
        Self {
            volume_ganged: false,
            biquads_per_channel: 0,
            agc: true,
            hpf: HighPassFilter::FsOver500,
            decimation: DecimationFilter::LinearPhase,
            summing: ChannelSumming::None,
            soft_stepping: true,
            agc_level: 10,
            agc_max_gain: 13,
            biquads: [BiquadCoefficients::default(); NUM_BIQUADS],
            high_pass: FirstOrderIir::default(),
        }
    }
}

/// Output mixer: `rows[out][in]` is the weight of input `in` in output `out`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MixerMatrix {
    /// Signed weights, one row per output channel.
    pub rows: [[i8; NUM_MIXER_INPUTS]; NUM_CHANNELS],
}

impl MixerMatrix {
    /// Each output carries only its own input.
    pub fn identity() -> Self {
        let mut rows = [[0i8; NUM_MIXER_INPUTS]; NUM_CHANNELS];
        for (i, row) in rows.iter_mut().enumerate() {
            if let Some(w) = row.get_mut(i) {
                *w = 1;
            }
        }
        Self { rows }
    }
}

impl Default for MixerMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

// ── GPIO ────────────────────────────────────────────────────────────────────

register_enum! {
    /// GPO pin function.
    pub enum GpoMode: 4 {
        /// Pin disabled.
        Disabled = 0,
        /// General-purpose output driven from GPO_VAL.
        Output = 1,
        /// Interrupt output.
        Interrupt = 2,
        /// Secondary ASI data output.
        SecondaryOutput = 3,
        /// PDM clock output.
        PdmClock = 4,
    }
}

register_enum! {
    /// GPO output stage.
    pub enum GpoDrive: 3 {
        /// High impedance.
        HiZ = 0,
        /// Active low and active high.
        PushPull = 1,
        /// Active low, weak pull-up high.
        OpenDrainPullUp = 2,
        /// Active low, Hi-Z high.
        OpenDrain = 3,
        /// Active high, weak pull-down low.
        OpenSourcePullDown = 4,
        /// Active high, Hi-Z low.
        OpenSource = 5,
    }
}

register_enum! {
    /// GPI pin function.
    pub enum GpiMode: 4 {
        /// Pin disabled.
        Disabled = 0,
        /// General-purpose input, read with GPI_MON.
        Input = 1,
        /// Master clock input.
        Mclk = 2,
        /// Secondary ASI data input.
        SecondaryInput = 3,
        /// PDM data for channels 1 and 2.
        Pdm12 = 4,
        /// PDM data for channels 3 and 4.
        Pdm34 = 5,
        /// PDM data for channels 5 and 6.
        Pdm56 = 6,
        /// PDM data for channels 7 and 8.
        Pdm78 = 7,
    }
}

/// One GPO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpoConfig {
    /// Pin function.
    pub mode: GpoMode,
    /// Output stage.
    pub drive: GpoDrive,
}

impl Default for GpoConfig {
    fn default() -> Self {
        Self {
            mode: GpoMode::Output,
            drive: GpoDrive::PushPull,
        }
    }
}

/// General-purpose pin functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioConfig {
    /// GPO1..GPO4.
    pub gpo: [GpoConfig; NUM_GPO],
    /// GPI1..GPI4.
    pub gpi: [GpiMode; NUM_GPI],
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            gpo: [GpoConfig::default(); NUM_GPO],
            gpi: [GpiMode::Input; NUM_GPI],
        }
    }
}

// ── Interrupts ──────────────────────────────────────────────────────────────

/// Interrupt pin polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPolarity {
    /// Asserted low.
    #[default]
    ActiveLow,
    /// Asserted high.
    ActiveHigh,
}

impl InterruptPolarity {
    /// `INT_POL` bit value.
    pub const fn is_active_high(self) -> bool {
        matches!(self, Self::ActiveHigh)
    }

    /// Decode the `INT_POL` bit.
    pub const fn from_active_high_bit(high: bool) -> Self {
        if high {
            Self::ActiveHigh
        } else {
            Self::ActiveLow
        }
    }
}

register_enum! {
    /// Interrupt pin behaviour while a source is pending.
    pub enum InterruptEvent: 2 {
        /// Assert until the latch is read.
        Assert = 0,
        /// Blink until the latch is read.
        Blink = 2,
        /// Single pulse per event.
        Pulse = 3,
    }
}

/// Interrupt routing and latches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptConfig {
    /// Pin polarity.
    pub polarity: InterruptPolarity,
    /// Pin behaviour.
    pub event: InterruptEvent,
    /// Reading the latch clears only unmasked sources.
    pub latch_read_unmasked: bool,
    /// Mask ASI clock errors.
    pub mask_asi: bool,
    /// Mask PLL lock events.
    pub mask_pll: bool,
    /// ASI clock error latch (INT_LTCH0 bit 7).
    ///
    /// On the device this is a status bit set by the fault, not a setting.
    /// Writing it is ignored, and reading it back may clear it, so a
    /// read-back value reports the latch state at that moment.
    pub latch_asi: bool,
    /// PLL lock latch (INT_LTCH0 bit 6). Status, with the same caveats as
    /// [`latch_asi`](Self::latch_asi).
    pub latch_pll: bool,
}

impl Default for InterruptConfig {
    fn default() -> Self {
        Self {
            polarity: InterruptPolarity::ActiveLow,
            event: InterruptEvent::Assert,
            latch_read_unmasked: false,
            mask_asi: false,
            mask_pll: false,
            latch_asi: false,
            latch_pll: false,
        }
    }
}

// ── Snapshot ────────────────────────────────────────────────────────────────

/// Complete device configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Power and references.
    pub system: SystemConfig,
    /// Serial interface and clocking.
    pub asi: AsiConfig,
    /// Input channels.
    pub channels: [ChannelConfig; NUM_CHANNELS],
    /// Pin functions.
    pub gpio: GpioConfig,
    /// Interrupts.
    pub interrupt: InterruptConfig,
    /// Filters and AGC.
    pub dsp: DspConfig,
    /// Output mixer.
    pub mixer: MixerMatrix,
}
