//! Real-time clock abstraction (BM8563, a PCF8563 clone, on the reference board)

use serde::{Deserialize, Serialize};

/// Calendar date and time as kept by the RTC chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Full year, e.g. 2024
    pub year: u16,
    /// 1–12
    pub month: u8,
    /// 1–31
    pub day: u8,
    /// 0–23
    pub hour: u8,
    /// 0–59
    pub minute: u8,
    /// 0–59
    pub second: u8,
    /// 0–6
    pub weekday: u8,
}

impl DateTime {
    /// True when every field is inside the range the chip can store.
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
            && self.weekday < 7
    }
}

/// Calendar clock.
pub trait RealTimeClock {
    /// Read the current date and time.
    fn datetime(&mut self) -> Result<DateTime, RtcError>;

    /// Set the date and time.
    fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), RtcError>;
}

/// RTC errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// I2C bus error
    Bus,
    /// Oscillator stopped; stored time is not trustworthy
    ClockIntegrity,
}

impl core::error::Error for RtcError {}

impl core::fmt::Display for RtcError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus => write!(f, "RTC bus error"),
            Self::ClockIntegrity => write!(f, "RTC clock integrity lost"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DateTime;

    fn sample() -> DateTime {
        DateTime {
            year: 2024,
            month: 6,
            day: 15,
            hour: 12,
            minute: 30,
            second: 0,
            weekday: 5,
        }
    }

    #[test]
    fn test_valid_datetime() {
        assert!(sample().is_valid());
    }

    #[test]
    fn test_month_zero_rejected() {
        let dt = DateTime { month: 0, ..sample() };
        assert!(!dt.is_valid());
    }

    #[test]
    fn test_hour_24_rejected() {
        let dt = DateTime { hour: 24, ..sample() };
        assert!(!dt.is_valid());
    }

    #[test]
    fn test_weekday_7_rejected() {
        let dt = DateTime { weekday: 7, ..sample() };
        assert!(!dt.is_valid());
    }
}
