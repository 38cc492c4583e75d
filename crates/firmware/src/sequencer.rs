//! Square-wave melody player.
//!
//! [`NoteSequencer::play`] starts the tone generator, walks the token list
//! one step at a time and stops the generator after the last step. Tokens
//! are validated as they are reached, so a bad token part-way through a
//! melody aborts it after the earlier steps have already sounded.
//!
//! On that error path the generator is left running at whatever pitch and
//! duty the last good step set. Callers that need silence must stop it
//! themselves.

use alloc::string::String;

use embedded_hal::delay::DelayNs;
use stick_platform::config::{BUZZER_MAX_DUTY, NOTE_MAX_MS};
use stick_platform::{ToneError, ToneGenerator};

use crate::notes::{round_half_even, NoteToken};

/// Melody errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequencerError {
    /// Token does not match the note grammar.
    #[error("Wrong note: {0}")]
    InvalidToken(String),
    /// `bpm` or `step` was zero.
    #[error("bpm and step must be greater than zero")]
    InvalidTempo,
    /// Generator rejected a write.
    #[error("buzzer: {0}")]
    Tone(#[from] ToneError),
}

/// Output volume, 0 to 100 percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Volume(u8);

impl Volume {
    /// 0 %
    pub const SILENT: Self = Self(0);
    /// 100 %
    pub const FULL: Self = Self(100);

    /// `None` above 100.
    pub const fn new(percent: u8) -> Option<Self> {
        if percent <= 100 {
            Some(Self(percent))
        } else {
            None
        }
    }

    /// Percentage
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// PWM duty for this volume, linear over `0..=BUZZER_MAX_DUTY`.
    pub fn duty(self) -> u16 {
        let scaled = u32::from(self.0).saturating_mul(u32::from(BUZZER_MAX_DUTY));
        u16::try_from(round_half_even(scaled, 100)).unwrap_or(BUZZER_MAX_DUTY)
    }
}

/// Length of one step: a quarter note at `bpm` scaled by `4 / step`,
/// rounded to the millisecond and capped at [`NOTE_MAX_MS`].
pub fn step_duration_ms(bpm: u32, step: u32) -> Result<u32, SequencerError> {
    if bpm == 0 || step == 0 {
        return Err(SequencerError::InvalidTempo);
    }
    // 60_000 / bpm / (step / 4)
    let ms = round_half_even(240_000, bpm.saturating_mul(step));
    Ok(ms.min(NOTE_MAX_MS))
}

/// Plays token streams on a tone generator.
pub struct NoteSequencer<T, D> {
    tone: T,
    delay: D,
}

impl<T: ToneGenerator, D: DelayNs> NoteSequencer<T, D> {
    /// Take ownership of the generator and the blocking delay used for holds.
    pub fn new(tone: T, delay: D) -> Self {
        Self { tone, delay }
    }

    /// Play `tokens` at `bpm`, one token per `1/step` note.
    ///
    /// Blocks for the whole melody.
    pub fn play<S: AsRef<str>>(
        &mut self,
        bpm: u32,
        step: u32,
        tokens: &[S],
    ) -> Result<(), SequencerError> {
        let hold_us = step_duration_ms(bpm, step)?.saturating_mul(1_000);
        debug!("Playing {} notes, {} us each", tokens.len(), hold_us);

        self.tone.start()?;
        for raw in tokens {
            let raw = raw.as_ref();
            let token: NoteToken = raw.parse().inspect_err(|_| {
                warn!("Wrong note: {}", raw);
            })?;
            match token {
                NoteToken::Rest => self.set_volume(Volume::SILENT)?,
                NoteToken::Sustain => {}
                NoteToken::Note { .. } => {
                    let hz = token
                        .frequency_hz()
                        .ok_or_else(|| SequencerError::InvalidToken(raw.into()))?;
                    self.set_volume(Volume::FULL)?;
                    self.tone.set_frequency(hz)?;
                }
            }
            if hold_us > 0 {
                self.delay.delay_us(hold_us);
            }
        }
        self.tone.stop()?;
        Ok(())
    }

    /// Write the duty for `volume`.
    pub fn set_volume(&mut self, volume: Volume) -> Result<(), ToneError> {
        self.tone.set_duty(volume.duty())
    }

    /// The generator
    pub fn tone(&self) -> &T {
        &self.tone
    }

    /// The delay
    pub fn delay(&self) -> &D {
        &self.delay
    }
}
