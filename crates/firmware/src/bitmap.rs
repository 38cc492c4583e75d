//! Uploaded background images.
//!
//! The admin page sends a Windows bitmap as a `data:image/bmp;base64,` URI.
//! [`decode`] validates it against the panel size and flattens it into
//! RGB565 values in raster order (top row first), ready for a single
//! framebuffer blit. Decoding is all-or-nothing: any failure returns an
//! error and no pixels.
//!
//! # Layout
//!
//! ```text
//! offset  size  field
//! 0       2     "BM"
//! 2       4     file size
//! 6       4     reserved
//! 10      4     pixel array offset
//! 14      4     info header size
//! 18      4     width  (signed)
//! 22      4     height (signed, positive = bottom-up rows)
//! 26      2     planes
//! 28      2     bits per pixel
//! 30      24    compression, image size, resolution, palette (ignored)
//! ```
//!
//! Rows are padded to a multiple of four bytes. 16-bit pixels are ARGB1555,
//! 24-bit pixels are stored blue, green, red.

use alloc::vec::Vec;

use base64::prelude::{Engine as _, BASE64_STANDARD};

use crate::color::{argb1555_to_rgb565, rgb565};

/// Required payload prefix.
pub const DATA_URI_PREFIX: &str = "data:image/bmp;base64,";

const SIGNATURE: &[u8] = b"BM";
const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: usize = 40;
const HEADERS_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

/// Bitmap decode errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BitmapError {
    /// Payload is not a bitmap data URI.
    #[error("Wrong base64 format: expecting data:image/bmp;base64,")]
    MissingPrefix,
    /// Payload after the prefix is not valid base64.
    #[error("Wrong base64 format: payload does not decode")]
    InvalidBase64,
    /// First two bytes are not `BM`.
    #[error("Wrong file format: expecting a bitmap file")]
    BadSignature,
    /// Fewer bytes than the two fixed headers.
    #[error("Wrong file size: expecting a valid bitmap file")]
    TooShort,
    /// Header dimensions differ from the panel.
    #[error("Wrong image size: expecting {expected_width}x{expected_height} dimension")]
    WrongDimensions {
        /// Required width
        expected_width: u32,
        /// Required height
        expected_height: u32,
        /// Width in the header
        width: i32,
        /// Height in the header
        height: i32,
    },
    /// Bits per pixel other than 16 or 24.
    #[error("Wrong bit count: expecting bitmap with 16 or 24 bits, got {0}")]
    UnsupportedBitDepth(u16),
    /// Pixel array ends before the last row.
    #[error("Wrong file size: pixel data is truncated")]
    Truncated,
}

/// Fields of the two headers that decoding needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    pixel_offset: u32,
    width: i32,
    height: i32,
    bits_per_pixel: u16,
}

impl Header {
    /// Read the headers. `bytes` must already be at least [`HEADERS_LEN`] long.
    fn parse(bytes: &[u8]) -> Result<Self, BitmapError> {
        Ok(Self {
            pixel_offset: u32::from_le_bytes(field(bytes, 10)?),
            width: i32::from_le_bytes(field(bytes, 18)?),
            height: i32::from_le_bytes(field(bytes, 22)?),
            bits_per_pixel: u16::from_le_bytes(field(bytes, 28)?),
        })
    }
}

fn field<const N: usize>(bytes: &[u8], at: usize) -> Result<[u8; N], BitmapError> {
    bytes
        .get(at..)
        .and_then(|tail| tail.get(..N))
        .and_then(|slice| slice.try_into().ok())
        .ok_or(BitmapError::TooShort)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PixelFormat {
    Argb1555,
    Bgr888,
}

impl PixelFormat {
    fn from_bits(bits: u16) -> Result<Self, BitmapError> {
        match bits {
            16 => Ok(Self::Argb1555),
            24 => Ok(Self::Bgr888),
            other => Err(BitmapError::UnsupportedBitDepth(other)),
        }
    }

    const fn bytes(self) -> usize {
        match self {
            Self::Argb1555 => 2,
            Self::Bgr888 => 3,
        }
    }

    const fn bits(self) -> usize {
        match self {
            Self::Argb1555 => 16,
            Self::Bgr888 => 24,
        }
    }

    /// `px` is exactly [`Self::bytes`] long (produced by `chunks_exact`).
    fn to_rgb565(self, px: &[u8]) -> u16 {
        match (self, px) {
            (Self::Argb1555, &[lo, hi]) => argb1555_to_rgb565(u16::from_le_bytes([lo, hi])),
            (Self::Bgr888, &[b, g, r]) => rgb565(r, g, b),
            _ => 0,
        }
    }
}

/// Padded row length in bytes: `ceil(width * bits / 32) * 4`.
pub fn row_stride(width: usize, bits_per_pixel: usize) -> Option<usize> {
    width
        .checked_mul(bits_per_pixel)?
        .checked_add(31)?
        .checked_div(32)?
        .checked_mul(4)
}

/// Decode a `data:image/bmp;base64,` payload that must be exactly
/// `expected_width` × `expected_height` pixels.
pub fn decode(
    encoded: &str,
    expected_width: u32,
    expected_height: u32,
) -> Result<Vec<u16>, BitmapError> {
    let payload = encoded
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or(BitmapError::MissingPrefix)?;
    let bytes = BASE64_STANDARD
        .decode(payload.trim_end())
        .map_err(|_| BitmapError::InvalidBase64)?;
    decode_bytes(&bytes, expected_width, expected_height)
}

/// Decode raw bitmap file bytes.
pub fn decode_bytes(
    bytes: &[u8],
    expected_width: u32,
    expected_height: u32,
) -> Result<Vec<u16>, BitmapError> {
    if bytes.get(..SIGNATURE.len()) != Some(SIGNATURE) {
        return Err(BitmapError::BadSignature);
    }
    if bytes.len() < HEADERS_LEN {
        return Err(BitmapError::TooShort);
    }

    let header = Header::parse(bytes)?;
    if i64::from(header.width) != i64::from(expected_width)
        || i64::from(header.height) != i64::from(expected_height)
    {
        return Err(BitmapError::WrongDimensions {
            expected_width,
            expected_height,
            width: header.width,
            height: header.height,
        });
    }
    let format = PixelFormat::from_bits(header.bits_per_pixel)?;

    let width = usize::try_from(expected_width).map_err(|_| BitmapError::Truncated)?;
    let height = usize::try_from(expected_height).map_err(|_| BitmapError::Truncated)?;
    let stride = row_stride(width, format.bits()).ok_or(BitmapError::Truncated)?;
    let data_len = stride.checked_mul(height).ok_or(BitmapError::Truncated)?;
    let offset = usize::try_from(header.pixel_offset).map_err(|_| BitmapError::Truncated)?;
    let data = bytes
        .get(offset..)
        .and_then(|tail| tail.get(..data_len))
        .ok_or(BitmapError::Truncated)?;

    let mut pixels = Vec::with_capacity(width.saturating_mul(height));
    if stride == 0 {
        return Ok(pixels);
    }
    // Stored bottom-up; walk the rows backwards to emit the top row first.
    for row in data.chunks_exact(stride).rev() {
        pixels.extend(
            row.chunks_exact(format.bytes())
                .take(width)
                .map(|px| format.to_rgb565(px)),
        );
    }
    Ok(pixels)
}
