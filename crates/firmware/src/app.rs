//! Boot sequence and control loop.
//!
//! [`App`] owns every driver. Boot runs once; after that [`App::tick`] is
//! called forever. One tick polls the three buttons in a fixed order, then
//! services at most one admin request to completion. Nothing runs
//! concurrently, so no state needs locking.

use alloc::format;
use alloc::string::String;

use embedded_hal::digital::OutputPin;
use stick_platform::config::{AP_SSID, APP_NAME, APP_VERSION, DATA_FOLDER, WLAN_PROFILE_PATH};
use stick_platform::{Storage, Transport};

use crate::admin::{self, AdminContext, DispatchError, Dispatcher};
use crate::board::{Board, Peripherals};
use crate::button::{ButtonChannel, EventKind};
use crate::config_store::{ConfigStore, KEY_PASSWORD, KEY_SSID};
use crate::display_state::DisplayState;
use crate::sequencer::NoteSequencer;
use crate::wifi::WifiSession;

/// Boot order. Each step only depends on the ones before it.
pub const BOOT_STEPS: &[&str] = &[
    "1. Storage: create the data folder, load the settings record",
    "2. Access point: fixed identity, never torn down afterwards",
    "3. Station: rejoin the stored profile if there is one",
    "4. Backlight on, AP identity drawn at the text anchor",
];

/// Which button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Front button
    A,
    /// Side button
    B,
    /// Power-side button
    C,
}

/// The firmware.
pub struct App<B: Board> {
    button_a: ButtonChannel<'static, B::Button>,
    button_b: ButtonChannel<'static, B::Button>,
    button_c: ButtonChannel<'static, B::Button>,
    ctx: AdminContext<B>,
    dispatcher: Dispatcher<AdminContext<B>>,
}

impl<B: Board> App<B> {
    /// Take ownership of the drivers and load persisted settings.
    pub fn new(peripherals: Peripherals<B>) -> Result<Self, DispatchError> {
        let Peripherals {
            display,
            backlight,
            led,
            button_a,
            button_b,
            button_c,
            imu,
            rtc,
            radio,
            tone,
            wifi_delay,
            note_delay,
            mut storage,
        } = peripherals;

        if !storage.exists(DATA_FOLDER) && storage.create_dir(DATA_FOLDER).is_err() {
            warn!("Could not create {}", DATA_FOLDER);
        }
        let config = ConfigStore::load_with_defaults(
            storage,
            WLAN_PROFILE_PATH,
            &[(KEY_SSID, ""), (KEY_PASSWORD, "")],
        );

        Ok(Self {
            button_a: ButtonChannel::new("Button A", button_a),
            button_b: ButtonChannel::new("Button B", button_b),
            button_c: ButtonChannel::new("Button C", button_c),
            ctx: AdminContext {
                display: DisplayState::default(),
                framebuffer: display,
                backlight,
                led,
                imu,
                rtc,
                wifi: WifiSession::new(radio, wifi_delay),
                buzzer: NoteSequencer::new(tone, note_delay),
                config,
            },
            dispatcher: admin::routes()?,
        })
    }

    /// Bring the device up. Failures are logged and boot carries on: the
    /// admin page must come up even on a half-working board.
    pub fn boot(&mut self) {
        info!("{} v{} booting", APP_NAME, APP_VERSION);

        if self.ctx.wifi.configure_ap().is_err() {
            warn!("Access point configuration failed");
        }

        let ssid = String::from(self.ctx.config.get(KEY_SSID).unwrap_or_default());
        let password = String::from(self.ctx.config.get(KEY_PASSWORD).unwrap_or_default());
        if ssid.is_empty() {
            info!("No stored WLAN profile");
        } else {
            self.ctx.wifi.connect(&ssid, &password);
        }

        if self.ctx.backlight.set_high().is_err() {
            warn!("Backlight enable failed");
        }

        let ip = self
            .ctx
            .wifi
            .ap_info()
            .map(|info| info.ip)
            .unwrap_or_else(|_| String::from("-"));
        let ssid_line = format!("AP SSID: {AP_SSID}");
        let ip_line = format!("AP IP: {ip}");
        if self
            .ctx
            .display
            .draw_lines(&mut self.ctx.framebuffer, &[&ssid_line, &ip_line])
            .is_err()
        {
            warn!("Boot screen draw failed");
        }
        info!("Boot complete, AP {} at {}", AP_SSID, ip.as_str());
    }

    /// One pass of the control loop.
    pub fn tick<T: Transport>(&mut self, transport: &mut T) {
        let a = self.button_a.poll();
        let led = match a {
            EventKind::Press => self.ctx.led.set_high(),
            EventKind::Release => self.ctx.led.set_low(),
            EventKind::Up | EventKind::Down => Ok(()),
        };
        if led.is_err() {
            warn!("LED write failed");
        }
        self.button_b.poll();
        self.button_c.poll();

        if let Some(request) = transport.poll_request() {
            let response = self.dispatcher.dispatch(&mut self.ctx, &request);
            transport.respond(response);
        }
    }

    /// Boot, then tick forever.
    pub fn run<T: Transport>(mut self, transport: &mut T) -> ! {
        self.boot();
        info!("Entering control loop");
        loop {
            self.tick(transport);
        }
    }

    /// Handler state
    pub fn context(&self) -> &AdminContext<B> {
        &self.ctx
    }

    /// Handler state, mutable
    pub fn context_mut(&mut self) -> &mut AdminContext<B> {
        &mut self.ctx
    }

    /// Route table
    pub fn dispatcher(&self) -> &Dispatcher<AdminContext<B>> {
        &self.dispatcher
    }

    /// A button channel, e.g. to register callbacks.
    pub fn button_mut(&mut self, id: ButtonId) -> &mut ButtonChannel<'static, B::Button> {
        match id {
            ButtonId::A => &mut self.button_a,
            ButtonId::B => &mut self.button_b,
            ButtonId::C => &mut self.button_c,
        }
    }
}
