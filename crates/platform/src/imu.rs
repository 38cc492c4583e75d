//! Inertial measurement unit abstraction (MPU6886 on the reference board)

use serde::Serialize;

/// Three-axis reading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
    /// X axis
    pub x: f32,
    /// Y axis
    pub y: f32,
    /// Z axis
    pub z: f32,
}

/// Motion sensor snapshots.
///
/// Units follow the driver's scale factors: degrees Celsius, degrees per
/// second for the gyroscope and g for the accelerometer.
pub trait MotionSensor {
    /// Die temperature.
    fn temperature(&mut self) -> Result<f32, SensorError>;

    /// Angular rate.
    fn gyro(&mut self) -> Result<Axes, SensorError>;

    /// Linear acceleration.
    fn acceleration(&mut self) -> Result<Axes, SensorError>;
}

/// Sensor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// I2C bus error
    Bus,
}

impl core::error::Error for SensorError {}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus => write!(f, "Sensor bus error"),
        }
    }
}
