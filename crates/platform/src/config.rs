//! Board configuration and constants
//!
//! Central values shared by the platform seams and the firmware core.
//! Everything that names the device, sizes the panel or bounds a blocking
//! wait lives here rather than being hardcoded at the call site.

/// The application name
pub const APP_NAME: &str = "StickC Admin";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed SSID advertised by the always-on access point.
pub const AP_SSID: &str = "M5StickC";

// ── Display ──────────────────────────────────────────────────────────────────

/// Panel width in landscape orientation (ST7789 135×240 rotated 90°).
pub const DISPLAY_WIDTH: u32 = 240;

/// Panel height in landscape orientation.
pub const DISPLAY_HEIGHT: u32 = 135;

/// Default text anchor, X coordinate.
pub const TEXT_ANCHOR_X: i32 = 10;

/// Default text anchor, Y coordinate.
pub const TEXT_ANCHOR_Y: i32 = 20;

/// Vertical distance between consecutive lines of the 8×8 driver font.
pub const TEXT_LINE_HEIGHT: i32 = 10;

// ── Buzzer ───────────────────────────────────────────────────────────────────

/// PWM duty value that corresponds to 100 % buzzer volume.
pub const BUZZER_MAX_DUTY: u16 = 512;

/// Upper bound on a single note step, whatever the tempo.
pub const NOTE_MAX_MS: u32 = 4_000;

// ── Wi-Fi ────────────────────────────────────────────────────────────────────

/// Total budget for a station connect or disconnect to settle.
pub const WIFI_TIMEOUT_MS: u32 = 30_000;

/// Delay between two station status polls.
pub const WIFI_POLL_INTERVAL_MS: u32 = 200;

// ── Storage ──────────────────────────────────────────────────────────────────

/// Folder holding persisted settings.
pub const DATA_FOLDER: &str = "/data";

/// Key-value record holding the station profile.
pub const WLAN_PROFILE_PATH: &str = "/data/wlan_profile.json";
