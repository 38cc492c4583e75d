//! Melody tokens and the pitch table.
//!
//! Grammar, one token per step:
//!
//! ```text
//! note    = letter [accidental] octave
//! letter  = "A" … "G"
//! accidental = "#" | "b"
//! octave  = "0" … "9"
//! rest    = "_"
//! sustain = "~"
//! ```
//!
//! Every spelling has its own table row, enharmonic or not; `E#` reads the
//! `F` row because the table says so, not because of a semitone shift.

use alloc::string::String;
use core::str::FromStr;

use crate::sequencer::SequencerError;

/// Natural pitch letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Letter {
    /// C
    C,
    /// D
    D,
    /// E
    E,
    /// F
    F,
    /// G
    G,
    /// A
    A,
    /// B
    B,
}

impl Letter {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'C' => Some(Self::C),
            b'D' => Some(Self::D),
            b'E' => Some(Self::E),
            b'F' => Some(Self::F),
            b'G' => Some(Self::G),
            b'A' => Some(Self::A),
            b'B' => Some(Self::B),
            _ => None,
        }
    }
}

/// Sharp, flat or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Accidental {
    /// No accidental
    Natural,
    /// `#`
    Sharp,
    /// `b`
    Flat,
}

/// A validated melody step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoteToken {
    /// Sound a pitch.
    Note {
        /// Pitch letter
        letter: Letter,
        /// Accidental
        accidental: Accidental,
        /// Octave, 0 to 9
        octave: u8,
    },
    /// `_`: silence, frequency untouched.
    Rest,
    /// `~`: keep whatever is sounding.
    Sustain,
}

impl NoteToken {
    /// Frequency for a pitched token, rounded to whole hertz.
    pub fn frequency_hz(self) -> Option<u32> {
        let Self::Note {
            letter,
            accidental,
            octave,
        } = self
        else {
            return None;
        };
        let centi_hz = *pitch_row(letter, accidental).get(usize::from(octave))?;
        Some(round_half_even(centi_hz, 100))
    }
}

impl FromStr for NoteToken {
    type Err = SequencerError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || SequencerError::InvalidToken(String::from(token));
        match token.as_bytes() {
            b"_" => Ok(Self::Rest),
            b"~" => Ok(Self::Sustain),
            [letter, octave] => Ok(Self::Note {
                letter: Letter::from_byte(*letter).ok_or_else(invalid)?,
                accidental: Accidental::Natural,
                octave: octave_digit(*octave).ok_or_else(invalid)?,
            }),
            [letter, accidental, octave] => Ok(Self::Note {
                letter: Letter::from_byte(*letter).ok_or_else(invalid)?,
                accidental: match accidental {
                    b'#' => Accidental::Sharp,
                    b'b' => Accidental::Flat,
                    _ => return Err(invalid()),
                },
                octave: octave_digit(*octave).ok_or_else(invalid)?,
            }),
            _ => Err(invalid()),
        }
    }
}

/// `numerator / denominator`, ties to even. A zero denominator yields zero.
pub(crate) fn round_half_even(numerator: u32, denominator: u32) -> u32 {
    let (Some(quotient), Some(remainder)) = (
        numerator.checked_div(denominator),
        numerator.checked_rem(denominator),
    ) else {
        return 0;
    };
    let twice = u64::from(remainder).saturating_mul(2);
    let denominator = u64::from(denominator);
    if twice > denominator || (twice == denominator && quotient & 1 == 1) {
        quotient.saturating_add(1)
    } else {
        quotient
    }
}

fn octave_digit(byte: u8) -> Option<u8> {
    byte.is_ascii_digit().then(|| byte.wrapping_sub(b'0'))
}

// ─── Pitch table (hundredths of a hertz, octaves 0–9) ───────────────────────

type Row = [u32; 10];

const C: Row = [1635, 3270, 6541, 13081, 26163, 52325, 104650, 209300, 418601, 837202];
const D: Row = [1835, 3671, 7342, 14683, 29366, 58733, 117466, 234932, 469864, 939727];
const E: Row = [2060, 4120, 8241, 16481, 32963, 65926, 131851, 263702, 527404, 1054808];
const F: Row = [2183, 4365, 8731, 17461, 34923, 69846, 139691, 279383, 558765, 1117530];
const G: Row = [2450, 4900, 9800, 19600, 39200, 78399, 156798, 313596, 627193, 1254385];
const A: Row = [2750, 5500, 11000, 22000, 44000, 88000, 176000, 352000, 704000, 1408000];
const B: Row = [3087, 6174, 12347, 24694, 49388, 98777, 197553, 395107, 790213, 1580427];

const C_SHARP: Row = [1732, 3465, 6930, 13859, 27718, 55437, 110873, 221746, 443492, 886984];
const D_SHARP: Row = [1945, 3889, 7778, 15556, 31113, 62225, 124451, 248902, 497803, 995606];
const E_SHARP: Row = [2183, 4365, 8731, 17461, 34923, 69846, 139691, 279383, 558765, 1117530];
const F_SHARP: Row = [2312, 4625, 9250, 18500, 36999, 73999, 147998, 295996, 591991, 1183982];
const G_SHARP: Row = [2596, 5191, 10383, 20765, 41530, 83061, 166122, 332244, 664488, 1328975];
const A_SHARP: Row = [2914, 5827, 11654, 23308, 46616, 93233, 186466, 372931, 745862, 1491724];
const B_SHARP: Row = [3270, 6541, 13081, 26163, 52325, 104650, 209300, 418601, 837202, 1674404];

const C_FLAT: Row = [1543, 3087, 6174, 12347, 24694, 49388, 98777, 197553, 395107, 790213];
const D_FLAT: Row = [1732, 3465, 6930, 13859, 27718, 55437, 110873, 221746, 443492, 886984];
const E_FLAT: Row = [1945, 3889, 7778, 15556, 31113, 62225, 124451, 248902, 497803, 995606];
const F_FLAT: Row = [2060, 4120, 8241, 16481, 32963, 65926, 131851, 263702, 527404, 1054808];
const G_FLAT: Row = [2312, 4625, 9250, 18500, 36999, 73999, 147998, 295996, 591991, 1183982];
const A_FLAT: Row = [2596, 5191, 10383, 20765, 41530, 83061, 166122, 332244, 664488, 1328975];
const B_FLAT: Row = [2914, 5827, 11654, 23308, 46616, 93233, 186466, 372931, 745862, 1491724];

const fn pitch_row(letter: Letter, accidental: Accidental) -> &'static Row {
    use Accidental::{Flat, Natural, Sharp};
    match (letter, accidental) {
        (Letter::C, Natural) => &C,
        (Letter::D, Natural) => &D,
        (Letter::E, Natural) => &E,
        (Letter::F, Natural) => &F,
        (Letter::G, Natural) => &G,
        (Letter::A, Natural) => &A,
        (Letter::B, Natural) => &B,
        (Letter::C, Sharp) => &C_SHARP,
        (Letter::D, Sharp) => &D_SHARP,
        (Letter::E, Sharp) => &E_SHARP,
        (Letter::F, Sharp) => &F_SHARP,
        (Letter::G, Sharp) => &G_SHARP,
        (Letter::A, Sharp) => &A_SHARP,
        (Letter::B, Sharp) => &B_SHARP,
        (Letter::C, Flat) => &C_FLAT,
        (Letter::D, Flat) => &D_FLAT,
        (Letter::E, Flat) => &E_FLAT,
        (Letter::F, Flat) => &F_FLAT,
        (Letter::G, Flat) => &G_FLAT,
        (Letter::A, Flat) => &A_FLAT,
        (Letter::B, Flat) => &B_FLAT,
    }
}
