//! Buzzer abstraction
//!
//! A square-wave tone generator driven by one PWM channel. Frequency sets
//! the pitch, duty cycle sets the perceived volume (0 = silent, see
//! [`BUZZER_MAX_DUTY`](crate::config::BUZZER_MAX_DUTY) for full scale).

/// PWM tone generator.
pub trait ToneGenerator {
    /// Initialise the PWM channel and start driving the pin.
    fn start(&mut self) -> Result<(), ToneError>;

    /// Release the PWM channel; the pin stops toggling.
    fn stop(&mut self) -> Result<(), ToneError>;

    /// Set the output frequency in hertz.
    fn set_frequency(&mut self, hz: u32) -> Result<(), ToneError>;

    /// Set the raw duty value.
    fn set_duty(&mut self, duty: u16) -> Result<(), ToneError>;
}

/// Tone generator errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneError {
    /// Requested frequency outside what the timer can produce
    UnsupportedFrequency,
    /// PWM channel not initialised
    NotStarted,
}

impl core::error::Error for ToneError {}

impl core::fmt::Display for ToneError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedFrequency => write!(f, "Unsupported buzzer frequency"),
            Self::NotStarted => write!(f, "Buzzer PWM not started"),
        }
    }
}
