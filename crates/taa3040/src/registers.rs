//! TAA3040 register map.
//!
//! Register addresses are only unique within a page. Every field the driver
//! touches is described by a [`Field`] constant; the domain modules never
//! spell out a shift or a mask themselves.
//!
//! Per-channel, per-slot and per-pin fields are declared once, at the first
//! instance, and relocated with [`Field::at`] using the `*_BASE` / `*_STRIDE`
//! constants below.

use crate::bitfield::{field_mask, pack, unpack};
use crate::page::Page;

// ── Page 0 register addresses ───────────────────────────────────────────────

/// Page select (present at 0x00 on every page).
pub const REG_PAGE_SELECT: u8 = 0x00;
/// Software reset (self-clearing).
pub const REG_SW_RESET: u8 = 0x01;
/// Sleep / regulator / quick-charge configuration.
pub const REG_SLEEP_CFG: u8 = 0x02;
/// Shutdown behaviour of the digital regulator.
pub const REG_SHDN_CFG: u8 = 0x05;
/// ASI format, word length and clock polarities.
pub const REG_ASI_CFG0: u8 = 0x07;
/// ASI LSB handling, keeper and slot offset.
pub const REG_ASI_CFG1: u8 = 0x08;
/// ASI daisy chain and error handling.
pub const REG_ASI_CFG2: u8 = 0x09;
/// ASI slot assignment for channel 1 (channels follow at stride 1).
pub const REG_ASI_CH1: u8 = 0x0B;
/// Master clock configuration.
pub const REG_MST_CFG0: u8 = 0x13;
/// Sample rate and FSYNC ratio.
pub const REG_MST_CFG1: u8 = 0x14;
/// PDM clock divider.
pub const REG_PDMCLK_CFG: u8 = 0x1F;
/// PDM data latch edges.
pub const REG_PDMIN_CFG: u8 = 0x20;
/// GPO1 mode and drive (GPO2..4 follow at stride 1).
pub const REG_GPO_CFG0: u8 = 0x22;
/// GPO output levels.
pub const REG_GPO_VAL: u8 = 0x29;
/// GPI1 / GPI2 modes.
pub const REG_GPI_CFG0: u8 = 0x2B;
/// GPI3 / GPI4 modes.
pub const REG_GPI_CFG1: u8 = 0x2C;
/// GPI input levels (read only).
pub const REG_GPI_MON: u8 = 0x2F;
/// Interrupt pin behaviour.
pub const REG_INT_CFG: u8 = 0x32;
/// Interrupt source masks.
pub const REG_INT_MASK0: u8 = 0x33;
/// Interrupt latch flags.
pub const REG_INT_LTCH0: u8 = 0x36;
/// Mic bias and ADC full-scale reference.
pub const REG_BIAS_CFG: u8 = 0x3B;
/// CH1_CFG0, first register of the per-channel blocks.
pub const REG_CH1_CFG0: u8 = 0x3C;
/// Decimation filter, summing and high-pass selection.
pub const REG_DSP_CFG0: u8 = 0x6B;
/// Volume ganging, biquad allocation, soft stepping and AGC.
pub const REG_DSP_CFG1: u8 = 0x6C;
/// AGC target level and maximum gain.
pub const REG_AGC_CFG0: u8 = 0x70;
/// Input channel enables (MSB-first).
pub const REG_IN_CH_EN: u8 = 0x73;
/// ASI output channel enables (MSB-first).
pub const REG_ASI_OUT_CH_EN: u8 = 0x74;
/// Power-up controls.
pub const REG_PWR_CFG: u8 = 0x75;
/// Channel power status (MSB-first, read only).
pub const REG_DEV_STS0: u8 = 0x76;
/// Device mode status (read only).
pub const REG_DEV_STS1: u8 = 0x77;

/// First address past the end of a page.
pub const PAGE_SIZE: u8 = 0x80;

// ── Strides ─────────────────────────────────────────────────────────────────

/// Distance between consecutive ASI_CHx registers.
pub const ASI_CH_STRIDE: u8 = 1;
/// Registers per channel block (CFG0..CFG4).
pub const CH_CFG_STRIDE: u8 = 5;
/// Distance between consecutive GPO_CFGx registers.
pub const GPO_CFG_STRIDE: u8 = 1;

/// Offset of CFG0 (source, type, coupling, impedance, AGC) in a channel block.
pub const CH_CFG0: u8 = 0;
/// Offset of CFG1 (analog gain).
pub const CH_CFG1: u8 = 1;
/// Offset of CFG2 (digital volume).
pub const CH_CFG2: u8 = 2;
/// Offset of CFG3 (gain calibration).
pub const CH_CFG3: u8 = 3;
/// Offset of CFG4 (phase calibration).
pub const CH_CFG4: u8 = 4;

// ── Coefficient pages ───────────────────────────────────────────────────────

/// First coefficient register on the biquad and mixer pages.
pub const COEFF_BASE: u8 = 0x08;
/// Bytes occupied by one biquad section (five 4-byte taps).
pub const BIQUAD_STRIDE: u8 = 20;
/// Biquad sections held by one page.
pub const BIQUADS_PER_PAGE: u8 = 6;
/// First-order IIR N0 tap (page 4).
pub const REG_IIR_N0: u8 = 0x48;
/// First-order IIR N1 tap (page 4).
pub const REG_IIR_N1: u8 = 0x4C;
/// First-order IIR D1 tap (page 4).
pub const REG_IIR_D1: u8 = 0x50;
/// Bytes occupied by one mixer row (eight signed weights).
pub const MIXER_ROW_STRIDE: u8 = 8;

/// How a field's bits are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    /// Unsigned integer or enumeration code.
    Unsigned,
    /// Single-bit boolean.
    Flag,
    /// Two's-complement signed value.
    Signed,
}

/// Location and width of one configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Datasheet mnemonic.
    pub name: &'static str,
    /// Page holding the register.
    pub page: Page,
    /// Register address within the page.
    pub address: u8,
    /// Bit offset of the least significant field bit.
    pub shift: u8,
    /// Field width in bits.
    pub width: u8,
    /// Interpretation of the bits.
    pub kind: FieldKind,
}

impl Field {
    const fn new(name: &'static str, address: u8, shift: u8, width: u8, kind: FieldKind) -> Self {
        Self {
            name,
            page: Page::CONFIG,
            address,
            shift,
            width,
            kind,
        }
    }

    const fn flag(name: &'static str, address: u8, bit: u8) -> Self {
        Self::new(name, address, bit, 1, FieldKind::Flag)
    }

    const fn unsigned(name: &'static str, address: u8, shift: u8, width: u8) -> Self {
        Self::new(name, address, shift, width, FieldKind::Unsigned)
    }

    const fn on_page(self, page: Page) -> Self {
        Self { page, ..self }
    }

    /// In-byte mask of this field.
    #[inline]
    pub const fn mask(self) -> u8 {
        field_mask(self.shift, self.width)
    }

    /// The same field moved to another address of its page.
    #[inline]
    pub const fn at(self, address: u8) -> Self {
        Self { address, ..self }
    }

    /// Write `value` into this field of `byte`.
    #[inline]
    pub const fn insert(self, byte: u8, value: u8) -> u8 {
        pack(byte, self.shift, self.mask(), value)
    }

    /// Read this field out of `byte`.
    #[inline]
    pub const fn extract(self, byte: u8) -> u8 {
        unpack(byte, self.shift, self.mask())
    }

    /// Write a boolean into this field of `byte`.
    #[inline]
    pub const fn insert_flag(self, byte: u8, on: bool) -> u8 {
        self.insert(byte, on as u8)
    }

    /// Read this field as a boolean.
    #[inline]
    pub const fn extract_flag(self, byte: u8) -> bool {
        self.extract(byte) != 0
    }
}

// ── Field descriptors ───────────────────────────────────────────────────────

/// Software reset trigger.
pub const SW_RESET: Field = Field::flag("SW_RESET", REG_SW_RESET, 0);

/// Internal AREG regulator select.
pub const AREG_SELECT: Field = Field::flag("AREG_SELECT", REG_SLEEP_CFG, 7);
/// VREF quick-charge duration.
pub const VREF_QCHG: Field = Field::unsigned("VREF_QCHG", REG_SLEEP_CFG, 3, 2);
/// I2C broadcast address enable.
pub const I2C_BRDCAST_EN: Field = Field::flag("I2C_BRDCAST_EN", REG_SLEEP_CFG, 2);
/// Sleep mode disable (1 = awake).
pub const SLEEP_ENZ: Field = Field::flag("SLEEP_ENZ", REG_SLEEP_CFG, 0);

/// Input coupling capacitor quick-charge duration.
pub const INCAP_QCHG: Field = Field::unsigned("INCAP_QCHG", REG_SHDN_CFG, 4, 2);
/// DREG behaviour on shutdown.
pub const SHDN_CFG_DREG: Field = Field::unsigned("SHDN_CFG", REG_SHDN_CFG, 2, 2);
/// DREG keep-alive time in wait mode.
pub const DREG_KA_TIME: Field = Field::unsigned("DREG_KA_TIME", REG_SHDN_CFG, 0, 2);

/// ASI protocol.
pub const ASI_FORMAT: Field = Field::unsigned("ASI_FORMAT", REG_ASI_CFG0, 6, 2);
/// ASI word length.
pub const ASI_WLEN: Field = Field::unsigned("ASI_WLEN", REG_ASI_CFG0, 4, 2);
/// FSYNC polarity inversion.
pub const FSYNC_POL: Field = Field::flag("FSYNC_POL", REG_ASI_CFG0, 3);
/// BCLK polarity inversion.
pub const BCLK_POL: Field = Field::flag("BCLK_POL", REG_ASI_CFG0, 2);
/// Transmit on the opposite BCLK edge.
pub const TX_EDGE: Field = Field::flag("TX_EDGE", REG_ASI_CFG0, 1);
/// Fill unused slots (0 = zeros, 1 = Hi-Z).
pub const TX_FILL: Field = Field::flag("TX_FILL", REG_ASI_CFG0, 0);

/// Hi-Z for half a cycle after the LSB.
pub const TX_LSB: Field = Field::flag("TX_LSB", REG_ASI_CFG1, 7);
/// Bus keeper after the LSB.
pub const TX_KEEPER: Field = Field::unsigned("TX_KEEPER", REG_ASI_CFG1, 5, 2);
/// BCLK cycles between FSYNC and slot 0.
pub const TX_OFFSET: Field = Field::unsigned("TX_OFFSET", REG_ASI_CFG1, 0, 5);

/// Daisy chain mode.
pub const ASI_DAISY: Field = Field::flag("ASI_DAISY", REG_ASI_CFG2, 7);
/// ASI error detection disable (active-low enable).
pub const ASI_ERR: Field = Field::flag("ASI_ERR", REG_ASI_CFG2, 5);
/// ASI error auto-recovery disable (active-low enable).
pub const ASI_ERR_RCOV: Field = Field::flag("ASI_ERR_RCOV", REG_ASI_CFG2, 4);

/// Route the channel to the secondary output (ASI_CH1, relocate per channel).
pub const CH_OUTPUT: Field = Field::flag("CH_OUTPUT", REG_ASI_CH1, 6);
/// TDM slot of the channel (ASI_CH1, relocate per channel).
pub const CH_SLOT: Field = Field::unsigned("CH_SLOT", REG_ASI_CH1, 0, 6);

/// Master (1) or slave (0).
pub const MST_SLV_CFG: Field = Field::flag("MST_SLV_CFG", REG_MST_CFG0, 7);
/// Automatic clock configuration disable (active-low enable).
pub const AUTO_CLK_CFG: Field = Field::flag("AUTO_CLK_CFG", REG_MST_CFG0, 6);
/// PLL disabled while auto clock configuration runs.
pub const AUTO_MODE_PLL_DIS: Field = Field::flag("AUTO_MODE_PLL_DIS", REG_MST_CFG0, 5);
/// Gate BCLK and FSYNC outputs.
pub const BCLK_FSYNC_GATE: Field = Field::flag("BCLK_FSYNC_GATE", REG_MST_CFG0, 4);
/// Sample-rate family (0 = 48 kHz, 1 = 44.1 kHz).
pub const FS_MODE: Field = Field::flag("FS_MODE", REG_MST_CFG0, 3);
/// MCLK frequency in master mode.
pub const MCLK_FREQ_SEL: Field = Field::unsigned("MCLK_FREQ_SEL", REG_MST_CFG0, 0, 3);

/// Sample rate in master mode.
pub const FS_RATE: Field = Field::unsigned("FS_RATE", REG_MST_CFG1, 4, 4);
/// BCLK to FSYNC ratio in master mode.
pub const FS_BCLK_RATIO: Field = Field::unsigned("FS_BCLK_RATIO", REG_MST_CFG1, 0, 4);

/// PDM clock divider.
pub const PDMCLK_DIV: Field = Field::unsigned("PDMCLK_DIV", REG_PDMCLK_CFG, 0, 2);
/// PDM latch edges, one bit per channel pair, MSB-first.
pub const PDMDIN_EDGE: Field = Field::unsigned("PDMDIN_EDGE", REG_PDMIN_CFG, 4, 4);

/// GPO function (GPO_CFG0, relocate per pin).
pub const GPO_CFG: Field = Field::unsigned("GPO_CFG", REG_GPO_CFG0, 4, 4);
/// GPO drive (GPO_CFG0, relocate per pin).
pub const GPO_DRV: Field = Field::unsigned("GPO_DRV", REG_GPO_CFG0, 0, 3);
/// GPO levels, GPO1 in the top bit.
pub const GPO_VAL: Field = Field::unsigned("GPO_VAL", REG_GPO_VAL, 3, 4);

/// GPI1 function.
pub const GPI1_CFG: Field = Field::unsigned("GPI1_CFG", REG_GPI_CFG0, 4, 4);
/// GPI2 function.
pub const GPI2_CFG: Field = Field::unsigned("GPI2_CFG", REG_GPI_CFG0, 0, 4);
/// GPI3 function.
pub const GPI3_CFG: Field = Field::unsigned("GPI3_CFG", REG_GPI_CFG1, 4, 4);
/// GPI4 function.
pub const GPI4_CFG: Field = Field::unsigned("GPI4_CFG", REG_GPI_CFG1, 0, 4);
/// GPI levels, GPI1 in the top bit.
pub const GPI_MON: Field = Field::unsigned("GPI_MON", REG_GPI_MON, 4, 4);

/// Interrupt pin polarity (1 = active high).
pub const INT_POL: Field = Field::flag("INT_POL", REG_INT_CFG, 7);
/// Interrupt pin behaviour.
pub const INT_EVENT: Field = Field::unsigned("INT_EVENT", REG_INT_CFG, 5, 2);
/// Latch read clears only unmasked sources.
pub const LTCH_READ_CFG: Field = Field::flag("LTCH_READ_CFG", REG_INT_CFG, 2);
/// Mask ASI clock errors.
pub const INT_MASK_ASI: Field = Field::flag("INT_MASK_ASI", REG_INT_MASK0, 7);
/// Mask PLL lock events.
pub const INT_MASK_PLL: Field = Field::flag("INT_MASK_PLL", REG_INT_MASK0, 6);
/// Latched ASI clock error.
pub const INT_LTCH_ASI: Field = Field::flag("INT_LTCH_ASI", REG_INT_LTCH0, 7);
/// Latched PLL lock event.
pub const INT_LTCH_PLL: Field = Field::flag("INT_LTCH_PLL", REG_INT_LTCH0, 6);

/// Mic bias level.
pub const MBIAS_VAL: Field = Field::unsigned("MBIAS_VAL", REG_BIAS_CFG, 4, 3);
/// ADC full-scale reference.
pub const ADC_FSCALE: Field = Field::unsigned("ADC_FSCALE", REG_BIAS_CFG, 0, 2);

/// Input source (CH1_CFG0, relocate per channel).
pub const CH_INSRC: Field = Field::unsigned("CH_INSRC", REG_CH1_CFG0, 6, 2);
/// Line (1) or microphone (0) input.
pub const CH_INTYP: Field = Field::flag("CH_INTYP", REG_CH1_CFG0, 5);
/// DC coupling.
pub const CH_DC: Field = Field::flag("CH_DC", REG_CH1_CFG0, 4);
/// Input impedance.
pub const CH_IMP: Field = Field::unsigned("CH_IMP", REG_CH1_CFG0, 2, 2);
/// Per-channel AGC enable.
pub const CH_AGCEN: Field = Field::flag("CH_AGCEN", REG_CH1_CFG0, 0);
/// Analog gain in dB (CH1_CFG1, relocate per channel).
pub const CH_GAIN: Field = Field::unsigned("CH_GAIN", REG_CH1_CFG0 + CH_CFG1, 2, 6);
/// Digital volume (CH1_CFG2, relocate per channel).
pub const CH_DVOL: Field = Field::unsigned("CH_DVOL", REG_CH1_CFG0 + CH_CFG2, 0, 8);
/// Gain calibration (CH1_CFG3, relocate per channel).
pub const CH_GCAL: Field = Field::unsigned("CH_GCAL", REG_CH1_CFG0 + CH_CFG3, 4, 4);
/// Phase calibration (CH1_CFG4, relocate per channel).
pub const CH_PCAL: Field = Field::unsigned("CH_PCAL", REG_CH1_CFG0 + CH_CFG4, 0, 8);

/// Decimation filter response.
pub const DECI_FILT: Field = Field::unsigned("DECI_FILT", REG_DSP_CFG0, 4, 2);
/// Channel summing mode.
pub const CH_SUM: Field = Field::unsigned("CH_SUM", REG_DSP_CFG0, 2, 2);
/// High-pass filter corner.
pub const HPF_SEL: Field = Field::unsigned("HPF_SEL", REG_DSP_CFG0, 0, 2);
/// Gang all digital volumes to channel 1.
pub const DVOL_GANG: Field = Field::flag("DVOL_GANG", REG_DSP_CFG1, 7);
/// Biquads allocated per channel.
pub const BIQUAD_CFG: Field = Field::unsigned("BIQUAD_CFG", REG_DSP_CFG1, 5, 2);
/// Soft-step disable (active-low soft stepping).
pub const DISABLE_SOFT_STEP: Field = Field::flag("DISABLE_SOFT_STEP", REG_DSP_CFG1, 4);
/// AGC algorithm select.
pub const AGC_SEL: Field = Field::flag("AGC_SEL", REG_DSP_CFG1, 3);
/// AGC target output level.
pub const AGC_LVL: Field = Field::unsigned("AGC_LVL", REG_AGC_CFG0, 4, 4);
/// AGC maximum gain.
pub const AGC_MAXGAIN: Field = Field::unsigned("AGC_MAXGAIN", REG_AGC_CFG0, 0, 4);

/// Input channel enables.
pub const IN_CH_EN: Field = Field::unsigned("IN_CH_EN", REG_IN_CH_EN, 0, 8);
/// ASI output channel enables.
pub const ASI_OUT_CH_EN: Field = Field::unsigned("ASI_OUT_CH_EN", REG_ASI_OUT_CH_EN, 0, 8);

/// Mic bias power-up.
pub const MICBIAS_PDZ: Field = Field::flag("MICBIAS_PDZ", REG_PWR_CFG, 7);
/// ADC power-up.
pub const ADC_PDZ: Field = Field::flag("ADC_PDZ", REG_PWR_CFG, 6);
/// PLL power-up.
pub const PLL_PDZ: Field = Field::flag("PLL_PDZ", REG_PWR_CFG, 5);
/// Dynamic channel power-up.
pub const DYN_CH_PUPD_EN: Field = Field::flag("DYN_CH_PUPD_EN", REG_PWR_CFG, 4);
/// Channels eligible for dynamic power-up.
pub const DYN_MAXCH_SEL: Field = Field::unsigned("DYN_MAXCH_SEL", REG_PWR_CFG, 2, 2);

/// Channel power status.
pub const CH_PWR_STS: Field = Field::unsigned("CH_PWR_STS", REG_DEV_STS0, 0, 8);
/// Device mode status.
pub const MODE_STS: Field = Field::unsigned("MODE_STS", REG_DEV_STS1, 5, 3);

/// Mixer weight, row 0 input 0 (relocate per row and input).
pub const MIX_WEIGHT: Field =
    Field::new("MIX_WEIGHT", COEFF_BASE, 0, 8, FieldKind::Signed).on_page(Page::MIXER_IIR);

/// Every descriptor, for table-driven checks and register dumps.
pub const FIELDS: &[Field] = &[
    SW_RESET,
    AREG_SELECT,
    VREF_QCHG,
    I2C_BRDCAST_EN,
    SLEEP_ENZ,
    INCAP_QCHG,
    SHDN_CFG_DREG,
    DREG_KA_TIME,
    ASI_FORMAT,
    ASI_WLEN,
    FSYNC_POL,
    BCLK_POL,
    TX_EDGE,
    TX_FILL,
    TX_LSB,
    TX_KEEPER,
    TX_OFFSET,
    ASI_DAISY,
    ASI_ERR,
    ASI_ERR_RCOV,
    CH_OUTPUT,
    CH_SLOT,
    MST_SLV_CFG,
    AUTO_CLK_CFG,
    AUTO_MODE_PLL_DIS,
    BCLK_FSYNC_GATE,
    FS_MODE,
    MCLK_FREQ_SEL,
    FS_RATE,
    FS_BCLK_RATIO,
    PDMCLK_DIV,
    PDMDIN_EDGE,
    GPO_CFG,
    GPO_DRV,
    GPO_VAL,
    GPI1_CFG,
    GPI2_CFG,
    GPI3_CFG,
    GPI4_CFG,
    GPI_MON,
    INT_POL,
    INT_EVENT,
    LTCH_READ_CFG,
    INT_MASK_ASI,
    INT_MASK_PLL,
    INT_LTCH_ASI,
    INT_LTCH_PLL,
    MBIAS_VAL,
    ADC_FSCALE,
    CH_INSRC,
    CH_INTYP,
    CH_DC,
    CH_IMP,
    CH_AGCEN,
    CH_GAIN,
    CH_DVOL,
    CH_GCAL,
    CH_PCAL,
    DECI_FILT,
    CH_SUM,
    HPF_SEL,
    DVOL_GANG,
    BIQUAD_CFG,
    DISABLE_SOFT_STEP,
    AGC_SEL,
    AGC_LVL,
    AGC_MAXGAIN,
    IN_CH_EN,
    ASI_OUT_CH_EN,
    MICBIAS_PDZ,
    ADC_PDZ,
    PLL_PDZ,
    DYN_CH_PUPD_EN,
    DYN_MAXCH_SEL,
    CH_PWR_STS,
    MODE_STS,
    MIX_WEIGHT,
];

// ── Address helpers ─────────────────────────────────────────────────────────
//
// Callers validate indices first; the arithmetic cannot overflow for any
// in-range channel, section, row or pin.

/// ASI_CHx address for a zero-based channel.
#[inline]
pub const fn asi_channel_register(channel: u8) -> u8 {
    REG_ASI_CH1.wrapping_add(channel.wrapping_mul(ASI_CH_STRIDE))
}

/// Address of register `offset` (CH_CFG0..CH_CFG4) in a channel block.
#[inline]
pub const fn channel_register(channel: u8, offset: u8) -> u8 {
    REG_CH1_CFG0
        .wrapping_add(channel.wrapping_mul(CH_CFG_STRIDE))
        .wrapping_add(offset)
}

/// GPO_CFGx address for a zero-based pin.
#[inline]
pub const fn gpo_register(pin: u8) -> u8 {
    REG_GPO_CFG0.wrapping_add(pin.wrapping_mul(GPO_CFG_STRIDE))
}

/// GPI mode field for a zero-based pin, or `None` past GPI4.
pub const fn gpi_field(pin: u8) -> Option<Field> {
    match pin {
        0 => Some(GPI1_CFG),
        1 => Some(GPI2_CFG),
        2 => Some(GPI3_CFG),
        3 => Some(GPI4_CFG),
        _ => None,
    }
}

/// Page holding biquad `section`.
#[inline]
pub const fn biquad_page(section: u8) -> Page {
    if section < BIQUADS_PER_PAGE {
        Page::BIQUAD_LOW
    } else {
        Page::BIQUAD_HIGH
    }
}

/// Byte offset of biquad `section` from [`COEFF_BASE`] on its page.
#[inline]
pub const fn biquad_offset(section: u8) -> u8 {
    (section % BIQUADS_PER_PAGE).wrapping_mul(BIQUAD_STRIDE)
}

/// Address of tap `tap` (0 = N0 .. 4 = D2) of biquad `section`.
#[inline]
pub const fn biquad_tap_register(section: u8, tap: u8) -> u8 {
    COEFF_BASE
        .wrapping_add(biquad_offset(section))
        .wrapping_add(tap.wrapping_mul(4))
}

/// First address of mixer row `row` on page 4.
#[inline]
pub const fn mixer_row_register(row: u8) -> u8 {
    COEFF_BASE.wrapping_add(row.wrapping_mul(MIXER_ROW_STRIDE))
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::{NUM_BIQUADS, NUM_CHANNELS, NUM_GPO};

    #[test]
    fn no_two_fields_share_a_bit() {
        for (i, a) in FIELDS.iter().enumerate() {
            for b in &FIELDS[i + 1..] {
                if a.page == b.page && a.address == b.address {
                    assert_eq!(
                        a.mask() & b.mask(),
                        0,
                        "{} and {} overlap at page {} 0x{:02X}",
                        a.name,
                        b.name,
                        a.page.get(),
                        a.address
                    );
                }
            }
        }
    }

    #[test]
    fn every_field_fits_in_its_byte() {
        for f in FIELDS {
            assert!(f.width >= 1, "{} has zero width", f.name);
            assert!(f.shift + f.width <= 8, "{} spills past bit 7", f.name);
            assert!(f.address < PAGE_SIZE, "{} outside the page", f.name);
            assert_ne!(f.address, REG_PAGE_SELECT, "{} aliases page select", f.name);
        }
    }

    #[test]
    fn flags_are_one_bit_wide() {
        for f in FIELDS.iter().filter(|f| f.kind == FieldKind::Flag) {
            assert_eq!(f.width, 1, "{}", f.name);
        }
    }

    #[test]
    fn strided_blocks_do_not_collide_with_fixed_registers() {
        let asi = asi_channel_register(0)..=asi_channel_register(NUM_CHANNELS as u8 - 1);
        let ch = channel_register(0, CH_CFG0)..=channel_register(NUM_CHANNELS as u8 - 1, CH_CFG4);
        let gpo = gpo_register(0)..=gpo_register(NUM_GPO as u8 - 1);

        for f in FIELDS.iter().filter(|f| f.page == Page::CONFIG) {
            let strided_origin = [CH_OUTPUT, CH_SLOT, GPO_CFG, GPO_DRV]
                .iter()
                .any(|s| s.address == f.address)
                || (REG_CH1_CFG0..REG_CH1_CFG0 + CH_CFG_STRIDE).contains(&f.address);
            if strided_origin {
                continue;
            }
            assert!(!asi.contains(&f.address), "{} inside ASI_CH block", f.name);
            assert!(!ch.contains(&f.address), "{} inside channel blocks", f.name);
            assert!(!gpo.contains(&f.address), "{} inside GPO block", f.name);
        }
    }

    #[test]
    fn channel_blocks_tile_without_gaps() {
        assert_eq!(channel_register(0, CH_CFG0), 0x3C);
        assert_eq!(channel_register(1, CH_CFG0), 0x41);
        assert_eq!(channel_register(7, CH_CFG4), 0x63);
        assert_eq!(asi_channel_register(7), 0x12);
    }

    #[test]
    fn biquad_sections_stay_on_their_page() {
        for section in 0..NUM_BIQUADS as u8 {
            let last = biquad_tap_register(section, 4) + 3;
            assert!(last < PAGE_SIZE, "section {section} runs past the page");
        }
        assert_eq!(biquad_page(0), Page::BIQUAD_LOW);
        assert_eq!(biquad_page(5), Page::BIQUAD_LOW);
        assert_eq!(biquad_page(6), Page::BIQUAD_HIGH);
        assert_eq!(biquad_offset(11), 100);
    }

    #[test]
    fn mixer_rows_end_before_the_iir_taps() {
        let last = mixer_row_register(NUM_CHANNELS as u8 - 1) + MIXER_ROW_STRIDE - 1;
        assert!(last < REG_IIR_N0);
        assert_eq!(REG_IIR_N1 - REG_IIR_N0, 4);
        assert_eq!(REG_IIR_D1 - REG_IIR_N1, 4);
    }

    #[test]
    fn relocated_fields_keep_their_bits() {
        let ch3_gain = CH_GAIN.at(channel_register(3, CH_CFG1));
        assert_eq!(ch3_gain.address, 0x3C + 15 + 1);
        assert_eq!(ch3_gain.mask(), 0b1111_1100);
        assert_eq!(ch3_gain.insert(0b0000_0011, 40), (40 << 2) | 0b11);
        assert_eq!(ch3_gain.extract((40 << 2) | 0b11), 40);
    }
}
