//! Shared fixtures: a board made of `stick_platform::mocks`.

#![allow(dead_code)]

use stick_firmware::{App, Board, Peripherals};
use stick_platform::mocks::{
    MockDelay, MockDisplay, MockImu, MockInputPin, MockOutputPin, MockRadio, MockRtc,
    MockStorage, MockTone,
};

/// Board built from recording fakes.
pub struct MockBoard;

impl Board for MockBoard {
    type Display = MockDisplay;
    type Backlight = MockOutputPin;
    type Led = MockOutputPin;
    type Button = MockInputPin;
    type Imu = MockImu;
    type Rtc = MockRtc;
    type Radio = MockRadio;
    type Tone = MockTone;
    type Delay = MockDelay;
    type Storage = MockStorage;
}

/// Peripherals with idle buttons, a radio that accepts nothing and empty
/// storage.
pub fn peripherals() -> Peripherals<MockBoard> {
    Peripherals {
        display: MockDisplay::default(),
        backlight: MockOutputPin::new(false),
        led: MockOutputPin::new(false),
        button_a: MockInputPin::new(&[]),
        button_b: MockInputPin::new(&[]),
        button_c: MockInputPin::new(&[]),
        imu: MockImu::default(),
        rtc: MockRtc::default(),
        radio: MockRadio::new(),
        tone: MockTone::new(),
        wifi_delay: MockDelay::new(),
        note_delay: MockDelay::new(),
        storage: MockStorage::new(),
    }
}

/// Route `tracing` output to the test harness when the `tracing` feature is
/// on. Filter with `RUST_LOG`, e.g. `RUST_LOG=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// App over [`peripherals`].
pub fn app() -> App<MockBoard> {
    init_tracing();
    App::new(peripherals()).expect("route table builds")
}

/// Minimal BITMAPINFOHEADER file: `rows` are listed top to bottom, each
/// pixel `(b, g, r)`. Rows are stored bottom-up and padded to 4 bytes.
pub fn bmp24(width: u32, rows: &[Vec<(u8, u8, u8)>]) -> Vec<u8> {
    let height = rows.len() as u32;
    let stride = (width * 3).div_ceil(4) * 4;
    let data_len = stride * height;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(54 + data_len).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(&[0; 16]);
    for row in rows.iter().rev() {
        let start = out.len();
        for &(b, g, r) in row {
            out.extend_from_slice(&[b, g, r]);
        }
        out.resize(start + stride as usize, 0);
    }
    out
}
