//! Display abstraction layer

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Framebuffer-style access to the LCD controller.
///
/// All writes are synchronous; the driver pushes pixels over SPI before
/// returning. Pixel windows are RGB565 in the panel's native byte order,
/// row-major, top row first.
pub trait Framebuffer {
    /// Panel size in the current orientation.
    fn size(&self) -> Size;

    /// Flat-fill the whole panel with one colour.
    fn fill(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Write a window of raw RGB565 pixels.
    ///
    /// `pixels.len()` must equal `area.size.width * area.size.height`.
    fn blit(&mut self, area: Rectangle, pixels: &[u16]) -> Result<(), DisplayError>;

    /// Draw a line of text with the driver's built-in font.
    fn text(
        &mut self,
        text: &str,
        origin: Point,
        foreground: Rgb565,
        background: Rgb565,
    ) -> Result<(), DisplayError>;

    /// Full-panel bounding box.
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.size())
    }
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error
    Communication,
    /// Pixel window does not fit the panel or the buffer length is wrong
    OutOfBounds,
}

impl core::error::Error for DisplayError {}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "Display communication error"),
            Self::OutOfBounds => write!(f, "Pixel window out of bounds"),
        }
    }
}
