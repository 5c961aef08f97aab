//! Driver error type.

/// Errors returned by the TAA3040 driver.
///
/// `E` is the error type of the I2C transport. Transport failures are carried
/// opaquely; the driver never inspects them and never retries.
///
/// Every multi-register operation stops at the first failing access. The
/// registers written before the failure keep their new values: the device
/// has no transactional write, so a partially applied configuration is a
/// possible outcome of any `Err(Error::Bus(_))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// An I2C read or write failed.
    Bus(E),
    /// Driving the SHDNZ enable line failed.
    EnablePin,
    /// Channel index outside `0..NUM_CHANNELS`.
    InvalidChannel(u8),
    /// Biquad section index outside `0..NUM_BIQUADS`.
    InvalidBiquad(u8),
    /// Mixer row index outside `0..NUM_CHANNELS`.
    InvalidMixerRow(u8),
    /// GPI/GPO pin index outside `0..4`.
    InvalidPin(u8),
    /// Page number outside `0..=4`.
    InvalidPage(u8),
    /// Register address outside the 128-register page.
    InvalidRegister(u8),
    /// DEV_STS1 reported a mode field that is not sleep, idle or active.
    InvalidDeviceMode(u8),
}

impl<E> Error<E> {
    /// `true` for argument errors, which are always raised before any bus
    /// traffic.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidChannel(_)
                | Self::InvalidBiquad(_)
                | Self::InvalidMixerRow(_)
                | Self::InvalidPin(_)
                | Self::InvalidPage(_)
                | Self::InvalidRegister(_)
        )
    }
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Self::Bus(e)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "I2C transfer failed: {e:?}"),
            Self::EnablePin => write!(f, "Enable line could not be driven"),
            Self::InvalidChannel(ch) => write!(f, "Channel index {ch} out of range"),
            Self::InvalidBiquad(idx) => write!(f, "Biquad index {idx} out of range"),
            Self::InvalidMixerRow(row) => write!(f, "Mixer row {row} out of range"),
            Self::InvalidPin(pin) => write!(f, "GPIO pin index {pin} out of range"),
            Self::InvalidPage(page) => write!(f, "Page {page} does not exist"),
            Self::InvalidRegister(reg) => write!(f, "Register 0x{reg:02X} outside the page"),
            Self::InvalidDeviceMode(mode) => {
                write!(f, "Device reported undefined mode 0b{mode:03b}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_errors_are_classified() {
        assert!(Error::<()>::InvalidChannel(8).is_invalid_argument());
        assert!(Error::<()>::InvalidPage(5).is_invalid_argument());
        assert!(!Error::Bus(()).is_invalid_argument());
        assert!(!Error::<()>::InvalidDeviceMode(0).is_invalid_argument());
    }

    #[test]
    fn bus_errors_convert_with_question_mark() {
        fn fails() -> Result<(), Error<u8>> {
            Err(7u8)?;
            Ok(())
        }
        assert_eq!(fails(), Err(Error::Bus(7)));
    }

    #[test]
    fn display_names_the_bad_value() {
        let msg = std::format!("{}", Error::<()>::InvalidDeviceMode(0));
        assert!(msg.contains("0b000"), "got {msg}");
        let msg = std::format!("{}", Error::<()>::InvalidRegister(0x80));
        assert!(msg.contains("0x80"), "got {msg}");
    }
}
