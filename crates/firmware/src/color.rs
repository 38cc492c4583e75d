//! 16-bit colour packing.

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::IntoStorage;
use serde::Deserialize;

/// Pack 8-bit channels into RGB565 by truncating the low bits.
#[allow(clippy::arithmetic_side_effects)] // Safety: constant shifts below 16 on masked values
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Drop the alpha bit and widen green from 5 to 6 bits. Red and blue keep
/// their 5-bit values.
#[allow(clippy::arithmetic_side_effects)] // Safety: constant shifts below 16 on masked values
pub const fn argb1555_to_rgb565(argb: u16) -> u16 {
    let red = (argb >> 10) & 0x1F;
    let green = (argb >> 5) & 0x1F;
    let blue = argb & 0x1F;
    (red << 11) | (green << 6) | blue
}

/// Wrap a packed value for the framebuffer.
pub fn from_raw(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}

/// Packed value of a framebuffer colour.
pub fn to_raw(color: Rgb565) -> u16 {
    color.into_storage()
}

/// `{r, g, b}` request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rgb {
    /// Red, 0–255
    pub r: u8,
    /// Green, 0–255
    pub g: u8,
    /// Blue, 0–255
    pub b: u8,
}

impl From<Rgb> for Rgb565 {
    fn from(rgb: Rgb) -> Self {
        from_raw(rgb565(rgb.r, rgb.g, rgb.b))
    }
}
