//! Register page numbers.
//!
//! The register file is split into 128-byte pages. Register 0x00 on every page
//! is the page-select register, so a page change is always a single write of
//! the page number to address 0.

use crate::error::Error;

/// A register page in `0..=4`.
///
/// Page 1 is reserved on the TAA3040 but remains a valid select target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Page(u8);

impl Page {
    /// Device configuration, channel and status registers.
    pub const CONFIG: Self = Self(0);
    /// Reserved.
    pub const RESERVED: Self = Self(1);
    /// Biquad sections 0–5.
    pub const BIQUAD_LOW: Self = Self(2);
    /// Biquad sections 6–11.
    pub const BIQUAD_HIGH: Self = Self(3);
    /// Mixer matrix and first-order IIR.
    pub const MIXER_IIR: Self = Self(4);

    /// Highest selectable page.
    pub const MAX: u8 = 4;

    /// Validate a raw page number.
    pub fn new<E>(page: u8) -> Result<Self, Error<E>> {
        if page <= Self::MAX {
            Ok(Self(page))
        } else {
            Err(Error::InvalidPage(page))
        }
    }

    /// Raw page number as written to the page-select register.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<Page> for u8 {
    fn from(page: Page) -> u8 {
        page.0
    }
}
