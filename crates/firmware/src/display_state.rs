//! What is on the panel and how to redraw it.
//!
//! The background is either a flat colour or a full-panel image, never
//! both: setting a colour drops the image. Text is always drawn over a
//! freshly redrawn background so old text never shows through.

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, RgbColor};
use stick_platform::config::{TEXT_ANCHOR_X, TEXT_ANCHOR_Y, TEXT_LINE_HEIGHT};
use stick_platform::{DisplayError, Framebuffer};

/// Display state shared by the admin handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    background: Rgb565,
    foreground: Rgb565,
    image: Option<Vec<u16>>,
    anchor: Point,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            background: Rgb565::BLACK,
            foreground: Rgb565::WHITE,
            image: None,
            anchor: Point::new(TEXT_ANCHOR_X, TEXT_ANCHOR_Y),
        }
    }
}

impl DisplayState {
    /// Background colour
    pub fn background(&self) -> Rgb565 {
        self.background
    }

    /// Text colour
    pub fn foreground(&self) -> Rgb565 {
        self.foreground
    }

    /// Active background image, if any
    pub fn image(&self) -> Option<&[u16]> {
        self.image.as_deref()
    }

    /// Top-left of the first text line
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Fill the panel with `color` and make it the background. Drops any
    /// background image.
    pub fn set_background_color<F: Framebuffer>(
        &mut self,
        fb: &mut F,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.background = color;
        self.image = None;
        fb.fill(color)
    }

    /// Show `pixels` full-panel and keep them as the background.
    pub fn set_background_image<F: Framebuffer>(
        &mut self,
        fb: &mut F,
        pixels: Vec<u16>,
    ) -> Result<(), DisplayError> {
        fb.blit(fb.bounding_box(), &pixels)?;
        self.image = Some(pixels);
        Ok(())
    }

    /// Colour for subsequent text. Nothing is redrawn.
    pub fn set_foreground_color(&mut self, color: Rgb565) {
        self.foreground = color;
    }

    /// Repaint the background: the image if there is one, else the colour.
    pub fn redraw_background<F: Framebuffer>(&self, fb: &mut F) -> Result<(), DisplayError> {
        match &self.image {
            Some(pixels) => fb.blit(fb.bounding_box(), pixels),
            None => fb.fill(self.background),
        }
    }

    /// Repaint the background, then draw `text` at the anchor.
    pub fn draw_text<F: Framebuffer>(&self, fb: &mut F, text: &str) -> Result<(), DisplayError> {
        self.draw_lines(fb, &[text])
    }

    /// Repaint the background, then draw each line one line-height below
    /// the previous one, starting at the anchor.
    pub fn draw_lines<F: Framebuffer>(
        &self,
        fb: &mut F,
        lines: &[&str],
    ) -> Result<(), DisplayError> {
        self.redraw_background(fb)?;
        let mut origin = self.anchor;
        for line in lines {
            fb.text(line, origin, self.foreground, self.background)?;
            origin.y = origin.y.saturating_add(TEXT_LINE_HEIGHT);
        }
        Ok(())
    }
}
