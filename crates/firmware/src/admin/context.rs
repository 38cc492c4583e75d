//! State the admin handlers work on.

use embedded_hal::digital::StatefulOutputPin;

use crate::board::Board;
use crate::config_store::ConfigStore;
use crate::display_state::DisplayState;
use crate::sequencer::NoteSequencer;
use crate::wifi::WifiSession;

use super::reply::HandlerError;

/// Everything a handler may touch. Owned by the control loop and lent to
/// one handler at a time.
pub struct AdminContext<B: Board> {
    /// What is on the panel
    pub display: DisplayState,
    /// The panel
    pub framebuffer: B::Display,
    /// LCD backlight
    pub backlight: B::Backlight,
    /// Status LED
    pub led: B::Led,
    /// IMU
    pub imu: B::Imu,
    /// Calendar clock
    pub rtc: B::Rtc,
    /// AP and station
    pub wifi: WifiSession<B::Radio, B::Delay>,
    /// Buzzer
    pub buzzer: NoteSequencer<B::Tone, B::Delay>,
    /// Persisted settings
    pub config: ConfigStore<B::Storage>,
}

/// Write the complement of the pin's current level. Returns the new level.
pub fn toggle<P: StatefulOutputPin>(pin: &mut P) -> Result<bool, HandlerError> {
    pin.toggle().map_err(|_| HandlerError::Pin)?;
    pin.is_set_high().map_err(|_| HandlerError::Pin)
}
