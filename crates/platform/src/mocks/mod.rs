//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests. Every mock records what the
//! firmware asked of it so tests can assert on the exact hardware traffic.

#![cfg(any(test, feature = "std"))]
// Host-only test doubles; call counters cannot realistically overflow.
#![allow(clippy::arithmetic_side_effects)]

use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::convert::Infallible;
use core::net::Ipv4Addr;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::*;

// ── Display ──────────────────────────────────────────────────────────────────

/// One recorded display operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayOp {
    /// Full-panel fill
    Fill(Rgb565),
    /// Pixel window write
    Blit {
        /// Target window
        area: Rectangle,
        /// Pixels written
        pixels: Vec<u16>,
    },
    /// Text draw
    Text {
        /// Text drawn
        text: String,
        /// Top-left anchor
        origin: Point,
        /// Glyph colour
        foreground: Rgb565,
        /// Cell colour
        background: Rgb565,
    },
}

/// Mock display implementation
pub struct MockDisplay {
    size: Size,
    ops: Vec<DisplayOp>,
}

impl MockDisplay {
    /// Create new mock display
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            ops: Vec::new(),
        }
    }

    /// Recorded operations, oldest first
    pub fn ops(&self) -> &[DisplayOp] {
        &self.ops
    }

    /// Forget recorded operations
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

impl Framebuffer for MockDisplay {
    fn size(&self) -> Size {
        self.size
    }

    fn fill(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Fill(color));
        Ok(())
    }

    fn blit(&mut self, area: Rectangle, pixels: &[u16]) -> Result<(), DisplayError> {
        let expected = u64::from(area.size.width) * u64::from(area.size.height);
        let fits = area.top_left.x >= 0
            && area.top_left.y >= 0
            && i64::from(area.top_left.x) + i64::from(area.size.width)
                <= i64::from(self.size.width)
            && i64::from(area.top_left.y) + i64::from(area.size.height)
                <= i64::from(self.size.height);
        if !fits || expected != pixels.len() as u64 {
            return Err(DisplayError::OutOfBounds);
        }
        self.ops.push(DisplayOp::Blit {
            area,
            pixels: pixels.to_vec(),
        });
        Ok(())
    }

    fn text(
        &mut self,
        text: &str,
        origin: Point,
        foreground: Rgb565,
        background: Rgb565,
    ) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Text {
            text: text.to_string(),
            origin,
            foreground,
            background,
        });
        Ok(())
    }
}

// ── Buzzer ───────────────────────────────────────────────────────────────────

/// One recorded tone generator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneOp {
    /// PWM initialised
    Start,
    /// PWM released
    Stop,
    /// Frequency change
    Frequency(u32),
    /// Duty change
    Duty(u16),
}

/// Mock tone generator
#[derive(Default)]
pub struct MockTone {
    ops: Vec<ToneOp>,
    running: bool,
    frequency: Option<u32>,
    duty: u16,
}

impl MockTone {
    /// Create new mock tone generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls, oldest first
    pub fn ops(&self) -> &[ToneOp] {
        &self.ops
    }

    /// True between `start` and `stop`
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Last frequency written
    pub fn frequency(&self) -> Option<u32> {
        self.frequency
    }

    /// Last duty written
    pub fn duty(&self) -> u16 {
        self.duty
    }
}

impl ToneGenerator for MockTone {
    fn start(&mut self) -> Result<(), ToneError> {
        self.ops.push(ToneOp::Start);
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ToneError> {
        self.ops.push(ToneOp::Stop);
        self.running = false;
        Ok(())
    }

    fn set_frequency(&mut self, hz: u32) -> Result<(), ToneError> {
        self.ops.push(ToneOp::Frequency(hz));
        self.frequency = Some(hz);
        Ok(())
    }

    fn set_duty(&mut self, duty: u16) -> Result<(), ToneError> {
        self.ops.push(ToneOp::Duty(duty));
        self.duty = duty;
        Ok(())
    }
}

// ── Delay ────────────────────────────────────────────────────────────────────

/// Delay that returns immediately and records every requested wait in
/// microseconds.
#[derive(Default)]
pub struct MockDelay {
    waits_us: Vec<u64>,
}

impl MockDelay {
    /// Create new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Every wait, in call order
    pub fn waits_us(&self) -> &[u64] {
        &self.waits_us
    }

    /// Sum of all waits
    pub fn total_us(&self) -> u64 {
        self.waits_us.iter().sum()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_us.push(u64::from(ns) / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_us.push(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_us.push(u64::from(ms) * 1_000);
    }
}

// ── Pins ─────────────────────────────────────────────────────────────────────

/// Input pin replaying a scripted level sequence.
///
/// Once the script runs out the pin keeps reporting the idle level (high,
/// pull-up wiring).
pub struct MockInputPin {
    levels: VecDeque<bool>,
    reads: usize,
}

impl MockInputPin {
    /// Pin that will report `levels` (true = high) on successive reads.
    pub fn new(levels: &[bool]) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
            reads: 0,
        }
    }

    /// Queue more levels.
    pub fn push_levels(&mut self, levels: &[bool]) {
        self.levels.extend(levels.iter().copied());
    }

    /// Number of reads so far
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl ErrorType for MockInputPin {
    type Error = Infallible;
}

impl InputPin for MockInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.reads += 1;
        Ok(self.levels.pop_front().unwrap_or(true))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Output pin with readable state.
#[derive(Default)]
pub struct MockOutputPin {
    high: bool,
    writes: usize,
}

impl MockOutputPin {
    /// Pin starting at the given level.
    pub fn new(high: bool) -> Self {
        Self { high, writes: 0 }
    }

    /// Current level
    pub fn is_on(&self) -> bool {
        self.high
    }

    /// Number of level writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ErrorType for MockOutputPin {
    type Error = Infallible;
}

impl OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes += 1;
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.writes += 1;
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for MockOutputPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

// ── Sensors ──────────────────────────────────────────────────────────────────

/// Mock IMU returning fixed readings
pub struct MockImu {
    /// Reported temperature
    pub temperature: f32,
    /// Reported angular rate
    pub gyro: Axes,
    /// Reported acceleration
    pub acceleration: Axes,
    /// Fail every read with a bus error
    pub fail: bool,
}

impl Default for MockImu {
    fn default() -> Self {
        Self {
            temperature: 25.5,
            gyro: Axes { x: 0.5, y: -1.0, z: 2.0 },
            acceleration: Axes { x: 0.0, y: 0.0, z: 1.0 },
            fail: false,
        }
    }
}

impl MotionSensor for MockImu {
    fn temperature(&mut self) -> Result<f32, SensorError> {
        if self.fail {
            return Err(SensorError::Bus);
        }
        Ok(self.temperature)
    }

    fn gyro(&mut self) -> Result<Axes, SensorError> {
        if self.fail {
            return Err(SensorError::Bus);
        }
        Ok(self.gyro)
    }

    fn acceleration(&mut self) -> Result<Axes, SensorError> {
        if self.fail {
            return Err(SensorError::Bus);
        }
        Ok(self.acceleration)
    }
}

/// Mock RTC holding a settable time
pub struct MockRtc {
    now: DateTime,
}

impl MockRtc {
    /// Clock reading `now` until set
    pub fn new(now: DateTime) -> Self {
        Self { now }
    }
}

impl Default for MockRtc {
    fn default() -> Self {
        Self::new(DateTime {
            year: 2024,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            weekday: 1,
        })
    }
}

impl RealTimeClock for MockRtc {
    fn datetime(&mut self) -> Result<DateTime, RtcError> {
        Ok(self.now)
    }

    fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), RtcError> {
        self.now = *datetime;
        Ok(())
    }
}

// ── Radio ────────────────────────────────────────────────────────────────────

/// Mock dual-role radio.
///
/// A connect request only succeeds for credentials registered with
/// [`MockRadio::accept`]; the link then comes up after
/// `polls_until_connected` status polls. Anything else never connects.
pub struct MockRadio {
    accepted: Vec<(String, String)>,
    /// Status polls needed before an accepted connect reports up
    pub polls_until_connected: usize,
    /// Status polls needed before a disconnect reports down
    pub polls_until_disconnected: usize,
    pending_up: Option<usize>,
    pending_down: Option<usize>,
    connected: bool,
    ap_ssid: Option<String>,
    connect_attempts: Vec<(String, String)>,
    disconnect_calls: usize,
    status_polls: usize,
    scan_results: Vec<ScanRecord>,
}

impl MockRadio {
    /// Radio with no accepted credentials, disconnected.
    pub fn new() -> Self {
        Self {
            accepted: Vec::new(),
            polls_until_connected: 0,
            polls_until_disconnected: 0,
            pending_up: None,
            pending_down: None,
            connected: false,
            ap_ssid: None,
            connect_attempts: Vec::new(),
            disconnect_calls: 0,
            status_polls: 0,
            scan_results: Vec::new(),
        }
    }

    /// Allow a station connect with these credentials to succeed.
    pub fn accept(mut self, ssid: &str, password: &str) -> Self {
        self.accepted.push((ssid.to_string(), password.to_string()));
        self
    }

    /// Networks returned by `scan`.
    pub fn with_scan_results(mut self, results: Vec<ScanRecord>) -> Self {
        self.scan_results = results;
        self
    }

    /// Force the link up without a connect request.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Every connect request, oldest first
    pub fn connect_attempts(&self) -> &[(String, String)] {
        &self.connect_attempts
    }

    /// Number of disconnect requests
    pub fn disconnect_calls(&self) -> usize {
        self.disconnect_calls
    }

    /// Number of `is_connected` polls
    pub fn status_polls(&self) -> usize {
        self.status_polls
    }

    /// SSID set through `configure_ap`
    pub fn ap_ssid(&self) -> Option<&str> {
        self.ap_ssid.as_deref()
    }
}

impl Default for MockRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl WifiRadio for MockRadio {
    fn configure_ap(&mut self, ssid: &str) -> Result<(), RadioError> {
        self.ap_ssid = Some(ssid.to_string());
        Ok(())
    }

    fn ap_ifconfig(&mut self) -> Result<IfConfig, RadioError> {
        Ok(IfConfig {
            ip: Ipv4Addr::new(192, 168, 4, 1),
            netmask: Ipv4Addr::new(255, 255, 255, 0),
            gateway: Ipv4Addr::new(192, 168, 4, 1),
            dns: Ipv4Addr::new(0, 0, 0, 0),
        })
    }

    fn connect(&mut self, ssid: &str, password: &str) -> Result<(), RadioError> {
        self.connect_attempts
            .push((ssid.to_string(), password.to_string()));
        let accepted = self
            .accepted
            .iter()
            .any(|(s, p)| s == ssid && p == password);
        self.pending_up = accepted.then_some(self.polls_until_connected);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), RadioError> {
        self.disconnect_calls += 1;
        self.pending_up = None;
        self.pending_down = Some(self.polls_until_disconnected);
        Ok(())
    }

    fn is_connected(&mut self) -> bool {
        self.status_polls += 1;
        if let Some(remaining) = self.pending_up {
            if remaining == 0 {
                self.connected = true;
                self.pending_up = None;
            } else {
                self.pending_up = Some(remaining - 1);
            }
        }
        if let Some(remaining) = self.pending_down {
            if remaining == 0 {
                self.connected = false;
                self.pending_down = None;
            } else {
                self.pending_down = Some(remaining - 1);
            }
        }
        self.connected
    }

    fn sta_ifconfig(&mut self) -> Result<IfConfig, RadioError> {
        if !self.connected {
            return Err(RadioError::Inactive);
        }
        Ok(IfConfig {
            ip: Ipv4Addr::new(192, 168, 1, 50),
            netmask: Ipv4Addr::new(255, 255, 255, 0),
            gateway: Ipv4Addr::new(192, 168, 1, 1),
            dns: Ipv4Addr::new(192, 168, 1, 1),
        })
    }

    fn scan(&mut self) -> Result<Vec<ScanRecord>, RadioError> {
        Ok(self.scan_results.clone())
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

/// In-memory storage
#[derive(Default)]
pub struct MockStorage {
    files: BTreeMap<String, Vec<u8>>,
    /// Fail every read with an I/O error
    pub fail_reads: bool,
    writes: usize,
}

impl MockStorage {
    /// Empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one file.
    pub fn with_file(mut self, path: &str, data: &[u8]) -> Self {
        self.files.insert(path.to_string(), data.to_vec());
        self
    }

    /// Current contents of `path`
    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MockStorage {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Io);
        }
        self.files.get(path).cloned().ok_or(StorageError::NotFound)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        self.files.insert(path.to_string(), data.to_vec());
        self.writes += 1;
        Ok(())
    }

    fn exists(&mut self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn create_dir(&mut self, path: &str) -> Result<(), StorageError> {
        self.files.entry(path.to_string()).or_default();
        Ok(())
    }
}

// ── Transport ────────────────────────────────────────────────────────────────

/// Queue-backed transport
#[derive(Default)]
pub struct MockTransport {
    pending: VecDeque<Request>,
    responses: Vec<Response>,
}

impl MockTransport {
    /// Empty transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a request for the next poll.
    pub fn push(&mut self, request: Request) {
        self.pending.push_back(request);
    }

    /// Responses sent so far
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Requests not yet polled
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Transport for MockTransport {
    fn poll_request(&mut self) -> Option<Request> {
        self.pending.pop_front()
    }

    fn respond(&mut self, response: Response) {
        self.responses.push(response);
    }
}
