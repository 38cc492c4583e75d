//! StickC Admin firmware core.
//!
//! Everything above the drivers: button event channels, the buzzer note
//! sequencer, the bitmap decoder, the Wi-Fi session manager, the settings
//! store and the admin HTTP surface, tied together by [`app::App`].
//!
//! # Architecture
//!
//! ```text
//! App (boot + control loop)
//!         ↓
//! Admin dispatcher → handlers → AdminContext
//!         ↓
//! Components (button, sequencer, bitmap, wifi, config_store, display_state)
//!         ↓
//! stick-platform traits (Framebuffer, ToneGenerator, WifiRadio, Storage, …)
//! ```
//!
//! The crate is `no_std + alloc` and generic over a [`board::Board`], so the
//! same code runs on the device and on the host against
//! `stick_platform::mocks`.
//!
//! # Features
//!
//! - `std` - host builds and tests (pulls in `stick-platform/std`)
//! - `defmt` - log through defmt on the device
//! - `tracing` - log through tracing on the host

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

extern crate alloc;

#[macro_use]
mod log;

pub mod admin;
pub mod app;
pub mod bitmap;
pub mod board;
pub mod button;
pub mod color;
pub mod config_store;
pub mod display_state;
pub mod notes;
pub mod sequencer;
pub mod wifi;

pub use app::{App, ButtonId};
pub use board::{Board, Peripherals};
pub use button::{ButtonChannel, EventKind};
pub use config_store::{ConfigError, ConfigStore};
pub use display_state::DisplayState;
pub use notes::NoteToken;
pub use sequencer::{NoteSequencer, SequencerError, Volume};
pub use wifi::{InterfaceInfo, NetworkSummary, WifiSession};
