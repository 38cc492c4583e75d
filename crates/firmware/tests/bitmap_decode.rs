//! Bitmap decoder against panel-sized uploads. Run with
//! `cargo test -p stick-firmware --test bitmap_decode`
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
#![allow(clippy::cast_possible_truncation)]

mod common;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use proptest::prelude::*;
use stick_firmware::bitmap::{decode, decode_bytes, BitmapError, DATA_URI_PREFIX};
use stick_firmware::color::rgb565;
use stick_platform::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

fn panel_bitmap(top_left: (u8, u8, u8), fill: (u8, u8, u8)) -> Vec<u8> {
    let rows: Vec<Vec<_>> = (0..DISPLAY_HEIGHT)
        .map(|y| {
            (0..DISPLAY_WIDTH)
                .map(|x| if x == 0 && y == 0 { top_left } else { fill })
                .collect()
        })
        .collect();
    common::bmp24(DISPLAY_WIDTH, &rows)
}

fn data_uri(bytes: &[u8]) -> String {
    format!("{DATA_URI_PREFIX}{}", BASE64_STANDARD.encode(bytes))
}

#[test]
fn test_full_panel_red_corner() {
    // (b, g, r) = (0, 0, 255) in the top-left corner.
    let bytes = panel_bitmap((0, 0, 255), (0, 0, 0));
    let pixels = decode(&data_uri(&bytes), DISPLAY_WIDTH, DISPLAY_HEIGHT).unwrap();
    assert_eq!(pixels.len(), (DISPLAY_WIDTH * DISPLAY_HEIGHT) as usize);
    assert_eq!(pixels[0], rgb565(255, 0, 0));
    assert_eq!(pixels[0], 0xF800);
    assert!(pixels[1..].iter().all(|&p| p == 0));
}

#[test]
fn test_failures_are_distinct() {
    let good = panel_bitmap((0, 0, 0), (0, 0, 0));

    let mut bad_magic = good.clone();
    bad_magic[0] = b'X';
    let magic = decode_bytes(&bad_magic, DISPLAY_WIDTH, DISPLAY_HEIGHT).unwrap_err();

    let small = common::bmp24(2, &[vec![(0, 0, 0); 2], vec![(0, 0, 0); 2]]);
    let dims = decode_bytes(&small, DISPLAY_WIDTH, DISPLAY_HEIGHT).unwrap_err();

    let mut eight = good.clone();
    eight[28..30].copy_from_slice(&8u16.to_le_bytes());
    let depth8 = decode_bytes(&eight, DISPLAY_WIDTH, DISPLAY_HEIGHT).unwrap_err();

    let mut thirty_two = good;
    thirty_two[28..30].copy_from_slice(&32u16.to_le_bytes());
    let depth32 = decode_bytes(&thirty_two, DISPLAY_WIDTH, DISPLAY_HEIGHT).unwrap_err();

    assert_eq!(magic, BitmapError::BadSignature);
    assert!(matches!(
        dims,
        BitmapError::WrongDimensions { width: 2, height: 2, .. }
    ));
    assert_eq!(depth8, BitmapError::UnsupportedBitDepth(8));
    assert_eq!(depth32, BitmapError::UnsupportedBitDepth(32));
    assert_eq!(
        dims.to_string(),
        "Wrong image size: expecting 240x135 dimension"
    );
}

#[test]
fn test_truncated_upload_yields_no_pixels() {
    let mut bytes = panel_bitmap((0, 0, 0), (0, 0, 0));
    bytes.truncate(bytes.len() - 1);
    assert_eq!(
        decode_bytes(&bytes, DISPLAY_WIDTH, DISPLAY_HEIGHT),
        Err(BitmapError::Truncated)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any 24-bit colour packs by truncating each channel.
    #[test]
    fn prop_24bit_pixels_pack_by_truncation(
        b in any::<u8>(),
        g in any::<u8>(),
        r in any::<u8>(),
        width in 1u32..9,
    ) {
        let rows = vec![vec![(b, g, r); width as usize]; 2];
        let bytes = common::bmp24(width, &rows);
        let pixels = decode_bytes(&bytes, width, 2).unwrap();
        let expected = (u16::from(r >> 3) << 11) | (u16::from(g >> 2) << 5) | u16::from(b >> 3);
        prop_assert_eq!(pixels.len(), (width * 2) as usize);
        prop_assert!(pixels.iter().all(|&p| p == expected));
    }

    /// Rows come out top first whatever the padding.
    #[test]
    fn prop_rows_top_first(width in 1u32..9, top in any::<u8>(), bottom in any::<u8>()) {
        let rows = vec![
            vec![(top, top, top); width as usize],
            vec![(bottom, bottom, bottom); width as usize],
        ];
        let pixels = decode_bytes(&common::bmp24(width, &rows), width, 2).unwrap();
        prop_assert_eq!(pixels[0], rgb565(top, top, top));
        prop_assert_eq!(pixels[width as usize], rgb565(bottom, bottom, bottom));
    }
}
