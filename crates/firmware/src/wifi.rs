//! Wi-Fi session manager.
//!
//! The access point is configured once at boot and never torn down, so the
//! admin page stays reachable whatever the station does. Station connect and
//! disconnect are bounded: the radio is polled every [`POLL_INTERVAL`] until
//! the link settles or [`CONNECT_TIMEOUT`] worth of polls have elapsed
//! (150 polls with the defaults). Both block the control loop while they run.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Write as _;

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use serde::Serialize;
use stick_platform::config::{AP_SSID, WIFI_POLL_INTERVAL_MS, WIFI_TIMEOUT_MS};
use stick_platform::wifi::SSID_MAX_LEN;
use stick_platform::{IfConfig, RadioError, ScanRecord, WifiRadio};

/// Budget for a station connect or disconnect to settle.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(WIFI_TIMEOUT_MS as u64);

/// Delay between two status polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(WIFI_POLL_INTERVAL_MS as u64);

/// Interface snapshot returned by `/api/ap` and `/api/sta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    /// Network name
    pub ssid: String,
    /// Interface address
    pub ip: String,
    /// Subnet mask
    pub netmask: String,
    /// Default gateway
    pub gateway: String,
    /// DNS server
    pub dns: String,
}

impl InterfaceInfo {
    fn new(ssid: &str, config: &IfConfig) -> Self {
        Self {
            ssid: ssid.into(),
            ip: config.ip.to_string(),
            netmask: config.netmask.to_string(),
            gateway: config.gateway.to_string(),
            dns: config.dns.to_string(),
        }
    }
}

/// One scan result as served by `/api/wlan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    /// Network name
    pub ssid: String,
    /// Access point MAC, lowercase hex without separators
    pub bssid: String,
    /// Primary channel
    pub channel: u8,
    /// Signal strength
    pub dbm: i8,
    /// No authentication required
    pub is_open: bool,
}

impl From<&ScanRecord> for NetworkSummary {
    fn from(record: &ScanRecord) -> Self {
        let mut bssid = String::with_capacity(12);
        for byte in record.bssid {
            // Writing to a String cannot fail.
            let _ = write!(bssid, "{byte:02x}");
        }
        Self {
            ssid: record.ssid.as_str().into(),
            bssid,
            channel: record.channel,
            dbm: record.rssi,
            is_open: record.auth_mode == 0,
        }
    }
}

/// Owns the radio and the blocking delay used while waiting on it.
pub struct WifiSession<R, D> {
    radio: R,
    delay: D,
    sta_ssid: heapless::String<SSID_MAX_LEN>,
    polls: u64,
    interval_us: u32,
}

impl<R: WifiRadio, D: DelayNs> WifiSession<R, D> {
    /// Session with the default 30 s / 200 ms budget.
    pub fn new(radio: R, delay: D) -> Self {
        Self::with_budget(radio, delay, CONNECT_TIMEOUT, POLL_INTERVAL)
    }

    /// Session polling every `interval` for at most `timeout`. At least one
    /// poll is always made.
    pub fn with_budget(radio: R, delay: D, timeout: Duration, interval: Duration) -> Self {
        let polls = timeout
            .as_ticks()
            .checked_div(interval.as_ticks())
            .unwrap_or(1)
            .max(1);
        Self {
            radio,
            delay,
            sta_ssid: heapless::String::new(),
            polls,
            interval_us: u32::try_from(interval.as_micros()).unwrap_or(u32::MAX),
        }
    }

    /// Give the access point its fixed identity.
    pub fn configure_ap(&mut self) -> Result<(), RadioError> {
        self.radio.configure_ap(AP_SSID)
    }

    /// Station link state.
    pub fn is_connected(&mut self) -> bool {
        self.radio.is_connected()
    }

    /// Join `ssid` and wait for the link.
    ///
    /// Returns `false` without touching the radio if the station is already
    /// connected; callers switching networks disconnect first. Otherwise
    /// returns whether the link came up within the budget.
    pub fn connect(&mut self, ssid: &str, password: &str) -> bool {
        if self.radio.is_connected() {
            return false;
        }
        let Ok(name) = heapless::String::try_from(ssid) else {
            warn!("SSID longer than {} bytes", SSID_MAX_LEN);
            return false;
        };
        self.sta_ssid = name;

        info!("Connecting to WLAN {}...", ssid);
        if self.radio.connect(ssid, password).is_err() {
            warn!("Connect request rejected by the radio");
            return false;
        }
        if self.wait_for(true) {
            info!("Connected to {}", ssid);
            true
        } else {
            warn!("Connect to {} timed out", ssid);
            false
        }
    }

    /// Leave the current network and wait for the link to drop. Returns
    /// whether the station is down at the end of the budget.
    pub fn disconnect(&mut self) -> bool {
        if self.radio.is_connected() {
            info!("Disconnecting from WLAN...");
            if self.radio.disconnect().is_err() {
                warn!("Disconnect request rejected by the radio");
            }
        }
        let down = self.wait_for(false);
        if down {
            info!("Disconnected.");
        }
        down
    }

    /// Access point snapshot.
    pub fn ap_info(&mut self) -> Result<InterfaceInfo, RadioError> {
        let config = self.radio.ap_ifconfig()?;
        Ok(InterfaceInfo::new(AP_SSID, &config))
    }

    /// Station snapshot, `None` while disconnected.
    pub fn sta_info(&mut self) -> Option<InterfaceInfo> {
        if !self.radio.is_connected() {
            return None;
        }
        let config = self.radio.sta_ifconfig().ok()?;
        Some(InterfaceInfo::new(&self.sta_ssid, &config))
    }

    /// Nearby networks.
    pub fn scan(&mut self) -> Result<Vec<NetworkSummary>, RadioError> {
        Ok(self.radio.scan()?.iter().map(NetworkSummary::from).collect())
    }

    /// The radio
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// The delay
    pub fn delay(&self) -> &D {
        &self.delay
    }

    fn wait_for(&mut self, connected: bool) -> bool {
        for _ in 0..self.polls {
            if self.radio.is_connected() == connected {
                return true;
            }
            self.delay.delay_us(self.interval_us);
        }
        false
    }
}
