//! Button edge classifier.
//!
//! Each physical button gets one [`ButtonChannel`]. Every call to
//! [`ButtonChannel::poll`] samples the pin once, classifies the transition
//! against the level seen on the previous poll, and fires the callbacks
//! registered for that event kind.
//!
//! Buttons are wired active-low with a pull-up, so the idle level is high:
//!
//! | previous | current | event               | logged |
//! |----------|---------|---------------------|--------|
//! | low      | high    | [`EventKind::Release`] | yes |
//! | high     | high    | [`EventKind::Up`]      | no  |
//! | high     | low     | [`EventKind::Press`]   | yes |
//! | low      | low     | [`EventKind::Down`]    | yes |
//!
//! There is no debouncing; the control loop's own period is the only filter.

use alloc::boxed::Box;
use alloc::vec::Vec;

use embedded_hal::digital::InputPin;

/// Boxed callback invoked when its event fires.
pub type Callback<'a> = Box<dyn FnMut() + 'a>;

/// What a single poll observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// Low to high: the button was let go.
    Release,
    /// High to low: the button went down on this poll.
    Press,
    /// High and still high: idle.
    Up,
    /// Low and still low: held.
    Down,
}

impl EventKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 4] = [Self::Release, Self::Press, Self::Up, Self::Down];

    /// Classify a transition. `true` means the line is high.
    pub const fn classify(previous_high: bool, current_high: bool) -> Self {
        match (previous_high, current_high) {
            (false, true) => Self::Release,
            (true, true) => Self::Up,
            (true, false) => Self::Press,
            (false, false) => Self::Down,
        }
    }

    /// Look up a kind by its registration name (`on_release`, `on_press`,
    /// `on_up`, `on_down`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Registration name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Release => "on_release",
            Self::Press => "on_press",
            Self::Up => "on_up",
            Self::Down => "on_down",
        }
    }

    /// The idle state fires every poll, so it is kept out of the log.
    const fn is_logged(self) -> bool {
        !matches!(self, Self::Up)
    }
}

/// One physical button and its callbacks.
pub struct ButtonChannel<'a, P> {
    name: &'static str,
    pin: P,
    high: bool,
    on_release: Vec<Callback<'a>>,
    on_press: Vec<Callback<'a>>,
    on_up: Vec<Callback<'a>>,
    on_down: Vec<Callback<'a>>,
}

impl<'a, P: InputPin> ButtonChannel<'a, P> {
    /// Wrap `pin`. The channel starts at the idle (high) level.
    pub fn new(name: &'static str, pin: P) -> Self {
        Self {
            name,
            pin,
            high: true,
            on_release: Vec::new(),
            on_press: Vec::new(),
            on_up: Vec::new(),
            on_down: Vec::new(),
        }
    }

    /// Button name used in log lines.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Level recorded by the last poll, as 0 or 1.
    pub fn level(&self) -> u8 {
        u8::from(self.high)
    }

    /// Append `callback` to the list for `kind`.
    pub fn register(&mut self, kind: EventKind, callback: impl FnMut() + 'a) {
        self.callbacks_mut(kind).push(Box::new(callback));
    }

    /// Register by name. Unknown names are ignored.
    pub fn register_named(&mut self, name: &str, callback: impl FnMut() + 'a) {
        if let Some(kind) = EventKind::from_name(name) {
            self.register(kind, callback);
        }
    }

    /// Sample the pin once, classify, record the new level and run the
    /// matching callbacks in registration order.
    ///
    /// A failed pin read counts as "no change" and so yields `Up` or `Down`.
    pub fn poll(&mut self) -> EventKind {
        let current = self.pin.is_high().unwrap_or(self.high);
        let kind = EventKind::classify(self.high, current);
        self.high = current;

        if kind.is_logged() {
            info!("{} {}", self.name, kind.name());
        }
        for callback in self.callbacks_mut(kind).iter_mut() {
            callback();
        }
        kind
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }

    fn callbacks_mut(&mut self, kind: EventKind) -> &mut Vec<Callback<'a>> {
        match kind {
            EventKind::Release => &mut self.on_release,
            EventKind::Press => &mut self.on_press,
            EventKind::Up => &mut self.on_up,
            EventKind::Down => &mut self.on_down,
        }
    }
}
