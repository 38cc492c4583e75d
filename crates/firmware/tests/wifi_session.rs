//! Wi-Fi session budget. Run with `cargo test -p stick-firmware --test wifi_session`
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use embassy_time::Duration;
use stick_firmware::WifiSession;
use stick_platform::mocks::{MockDelay, MockRadio};

#[test]
fn test_station_that_never_connects_times_out() {
    let mut session = WifiSession::new(MockRadio::new(), MockDelay::new());
    assert!(!session.connect("nowhere", "pw"));

    // One pre-check plus 150 status polls, each followed by a 200 ms wait.
    assert_eq!(session.radio().status_polls(), 151);
    assert_eq!(session.delay().waits_us().len(), 150);
    assert_eq!(session.delay().total_us(), 30_000_000);
    assert!(session.sta_info().is_none());
}

#[test]
fn test_custom_budget() {
    let mut session = WifiSession::with_budget(
        MockRadio::new(),
        MockDelay::new(),
        Duration::from_millis(1_000),
        Duration::from_millis(100),
    );
    assert!(!session.connect("nowhere", "pw"));
    assert_eq!(session.delay().waits_us(), &[100_000; 10]);
}

#[test]
fn test_zero_timeout_still_polls_once() {
    let mut session = WifiSession::with_budget(
        MockRadio::new().accept("home", "pw"),
        MockDelay::new(),
        Duration::from_millis(0),
        Duration::from_millis(200),
    );
    assert!(session.connect("home", "pw"));
}

#[test]
fn test_access_point_untouched_by_station() {
    let mut session = WifiSession::new(MockRadio::new(), MockDelay::new());
    session.configure_ap().unwrap();
    assert!(!session.connect("nowhere", "pw"));
    assert!(session.disconnect());
    assert_eq!(session.radio().ap_ssid(), Some("M5StickC"));
    assert_eq!(session.ap_info().unwrap().ip, "192.168.4.1");
}

#[test]
fn test_disconnect_waits_for_link_drop() {
    let mut radio = MockRadio::new().accept("home", "pw");
    radio.polls_until_disconnected = 2;
    let mut session = WifiSession::new(radio, MockDelay::new());
    assert!(session.connect("home", "pw"));
    assert!(session.disconnect());
    assert_eq!(session.radio().disconnect_calls(), 1);
    assert_eq!(session.delay().waits_us().len(), 2);
    assert!(!session.is_connected());
}
