//! Board description.
//!
//! [`Board`] names the concrete driver type behind every seam so the core
//! can be generic over one parameter instead of ten. A hardware target
//! implements it once with its chip drivers; tests implement it with
//! `stick_platform::mocks`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, StatefulOutputPin};
use stick_platform::{
    Framebuffer, MotionSensor, RealTimeClock, Storage, ToneGenerator, WifiRadio,
};

/// Driver types of one board.
pub trait Board {
    /// LCD
    type Display: Framebuffer;
    /// LCD backlight enable
    type Backlight: StatefulOutputPin;
    /// Status LED
    type Led: StatefulOutputPin;
    /// Front and side buttons (active-low)
    type Button: InputPin;
    /// IMU
    type Imu: MotionSensor;
    /// Calendar clock
    type Rtc: RealTimeClock;
    /// Dual-role Wi-Fi radio
    type Radio: WifiRadio;
    /// Buzzer PWM
    type Tone: ToneGenerator;
    /// Blocking delay
    type Delay: DelayNs;
    /// Settings storage
    type Storage: Storage;
}

/// Every driver instance, handed over once at startup.
pub struct Peripherals<B: Board> {
    /// LCD
    pub display: B::Display,
    /// LCD backlight enable
    pub backlight: B::Backlight,
    /// Status LED
    pub led: B::Led,
    /// Button A (front)
    pub button_a: B::Button,
    /// Button B (side)
    pub button_b: B::Button,
    /// Button C (power side)
    pub button_c: B::Button,
    /// IMU
    pub imu: B::Imu,
    /// Calendar clock
    pub rtc: B::Rtc,
    /// Wi-Fi radio
    pub radio: B::Radio,
    /// Buzzer PWM
    pub tone: B::Tone,
    /// Delay used while waiting on the radio
    pub wifi_delay: B::Delay,
    /// Delay used for note holds
    pub note_delay: B::Delay,
    /// Settings storage
    pub storage: B::Storage,
}
