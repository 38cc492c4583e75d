//! Hardware Abstraction Layer (HAL) for the StickC admin firmware
//!
//! This crate provides trait-based abstractions for every peripheral the
//! firmware core talks to, so the core can be built and tested on the host
//! without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Control loop + admin dispatcher (firmware crate)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Chip drivers (ST7789, MPU6886, BM8563, radio, HTTP transport)
//! ```
//!
//! # Seams
//!
//! - [`Framebuffer`] - LCD fill, pixel-window blit and text
//! - [`ToneGenerator`] - PWM buzzer
//! - [`MotionSensor`] - IMU snapshots
//! - [`RealTimeClock`] - calendar clock
//! - [`WifiRadio`] - simultaneous access point + station radio
//! - [`Storage`] - whole-file persistence
//! - [`Transport`] - one pending admin request at a time
//!
//! Digital pins and blocking delays use the `embedded-hal` 1.0 traits
//! directly ([`InputPin`], [`StatefulOutputPin`], [`DelayNs`]).
//!
//! # Features
//!
//! - `std`: Enable standard library support (mocks, filesystem storage)
//! - `defmt`: Enable defmt logging derives

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // chip names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

extern crate alloc;

pub mod buzzer;
pub mod config;
pub mod display;
pub mod imu;
pub mod rtc;
pub mod storage;
pub mod transport;
pub mod wifi;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

#[cfg(feature = "std")]
pub mod storage_local;

// Re-export main high-level traits
pub use buzzer::{ToneError, ToneGenerator};
pub use display::{DisplayError, Framebuffer};
pub use imu::{Axes, MotionSensor, SensorError};
pub use rtc::{DateTime, RealTimeClock, RtcError};
pub use storage::{Storage, StorageError};
pub use transport::{Body, Method, Request, Response, Transport};
pub use wifi::{IfConfig, RadioError, ScanRecord, WifiRadio};

// Re-export the embedded-hal traits used at the pin and delay seams
pub use embedded_hal::delay::DelayNs;
pub use embedded_hal::digital::{InputPin, OutputPin, PinState, StatefulOutputPin};
