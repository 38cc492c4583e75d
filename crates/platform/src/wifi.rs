//! Wi-Fi radio abstraction
//!
//! The radio runs two interfaces at once: an access point that is always
//! active (so the admin surface stays reachable) and a station interface for
//! the uplink. The trait exposes raw, non-blocking operations; retry and
//! timeout policy belongs to the caller.

use alloc::vec::Vec;
use core::net::Ipv4Addr;

/// Longest SSID the 802.11 standard allows.
pub const SSID_MAX_LEN: usize = 32;

/// IP configuration of one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfConfig {
    /// Interface address
    pub ip: Ipv4Addr,
    /// Subnet mask
    pub netmask: Ipv4Addr,
    /// Default gateway
    pub gateway: Ipv4Addr,
    /// DNS server
    pub dns: Ipv4Addr,
}

/// One access point seen during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRecord {
    /// Network name
    pub ssid: heapless::String<SSID_MAX_LEN>,
    /// Hardware address of the access point
    pub bssid: [u8; 6],
    /// Primary channel
    pub channel: u8,
    /// Signal strength in dBm
    pub rssi: i8,
    /// Authentication mode; 0 means open
    pub auth_mode: u8,
}

/// Dual-role radio.
pub trait WifiRadio {
    /// Set the identity of the access point.
    fn configure_ap(&mut self, ssid: &str) -> Result<(), RadioError>;

    /// IP configuration of the access point.
    fn ap_ifconfig(&mut self) -> Result<IfConfig, RadioError>;

    /// Issue a station connect request. Returns as soon as the request is
    /// queued; poll [`WifiRadio::is_connected`] for the outcome.
    fn connect(&mut self, ssid: &str, password: &str) -> Result<(), RadioError>;

    /// Issue a station disconnect request.
    fn disconnect(&mut self) -> Result<(), RadioError>;

    /// Current station link state.
    fn is_connected(&mut self) -> bool;

    /// IP configuration of the station interface.
    fn sta_ifconfig(&mut self) -> Result<IfConfig, RadioError>;

    /// Blocking scan for nearby networks.
    fn scan(&mut self) -> Result<Vec<ScanRecord>, RadioError>;
}

/// Radio errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Interface not active
    Inactive,
    /// SSID or password rejected before reaching the air
    InvalidCredentials,
    /// Driver-level failure
    Driver,
}

impl core::error::Error for RadioError {}

impl core::fmt::Display for RadioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Inactive => write!(f, "Wi-Fi interface inactive"),
            Self::InvalidCredentials => write!(f, "Invalid Wi-Fi credentials"),
            Self::Driver => write!(f, "Wi-Fi driver error"),
        }
    }
}
