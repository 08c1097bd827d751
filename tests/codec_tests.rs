// tests/codec_tests.rs
use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, RgbImage, Rgba, RgbaImage};
use pixel_vault::codec::{
    encode_png, from_pixels, to_pixels, to_pixels_from_memory, to_pixels_from_path,
};
use pixel_vault::error::RevealError;
use pixel_vault::payload::Shape;
use tempfile::tempdir;

mod common;

/// Standard CRC-32 (IEEE) as required for PNG chunk trailers
fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xffff_ffffu32;
    for &b in bytes {
        crc ^= b as u32;
        for _ in 0..8 {
            crc = if crc & 1 == 1 {
                (crc >> 1) ^ 0xedb8_8320
            } else {
                crc >> 1
            };
        }
    }
    !crc
}

/// Insert an `eXIf` chunk carrying only an orientation tag right after IHDR
fn with_exif_orientation(png: &[u8], orientation: u16) -> Vec<u8> {
    // Little-endian TIFF header, one IFD entry: 0x0112 SHORT x1
    let mut exif = vec![
        b'I', b'I', 0x2a, 0x00, 0x08, 0x00, 0x00, 0x00, // header, IFD at 8
        0x01, 0x00, // one entry
        0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, // tag, type, count
    ];
    exif.extend_from_slice(&orientation.to_le_bytes());
    exif.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

    let mut chunk = Vec::new();
    chunk.extend_from_slice(&(exif.len() as u32).to_be_bytes());
    let mut body = b"eXIf".to_vec();
    body.extend_from_slice(&exif);
    chunk.extend_from_slice(&body);
    chunk.extend_from_slice(&crc32(&body).to_be_bytes());

    // 8-byte signature + IHDR (4 len + 4 type + 13 data + 4 crc)
    let ihdr_end = 8 + 25;
    let mut out = png[..ihdr_end].to_vec();
    out.extend_from_slice(&chunk);
    out.extend_from_slice(&png[ihdr_end..]);
    out
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Vec::new();
    image.write_to(&mut Cursor::new(&mut out), format).unwrap();
    out
}

#[test]
fn test_png_round_trip_is_byte_identical() {
    common::setup();
    let png = encode_png(&common::gradient(13, 7, 3)).unwrap();

    let first = to_pixels_from_memory(&png).unwrap();
    assert_eq!(first.shape, Shape::new(13, 7));
    assert_eq!(first.bytes.len(), 13 * 7 * 3);

    let rebuilt = from_pixels(first.bytes.clone(), first.shape).unwrap();
    let second = to_pixels_from_memory(&encode_png(&rebuilt).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_lossy_source_round_trips_after_first_decode() {
    let jpeg = encode(DynamicImage::ImageRgb8(common::gradient(16, 16, 9)), ImageFormat::Jpeg);

    let first = to_pixels_from_memory(&jpeg).unwrap();
    let rebuilt = from_pixels(first.bytes.clone(), first.shape).unwrap();
    let second = to_pixels_from_memory(&encode_png(&rebuilt).unwrap()).unwrap();
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn test_alpha_channel_is_dropped() {
    let rgba = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 40]));
    let pixels = to_pixels(DynamicImage::ImageRgba8(rgba));
    assert_eq!(pixels.bytes, vec![10, 20, 30, 10, 20, 30]);
}

#[test]
fn test_grayscale_is_widened_to_rgb() {
    let png = encode(
        DynamicImage::ImageLuma8(GrayImage::from_pixel(1, 2, Luma([77]))),
        ImageFormat::Png,
    );
    let pixels = to_pixels_from_memory(&png).unwrap();
    assert_eq!(pixels.shape, Shape::new(1, 2));
    assert_eq!(pixels.bytes, vec![77; 6]);
}

#[test]
fn test_from_pixels_rejects_wrong_length() {
    let err = from_pixels(vec![0u8; 11], Shape::new(2, 2)).unwrap_err();
    assert!(matches!(
        err,
        RevealError::ShapeMismatch {
            expected: 12,
            actual: 11
        }
    ));

    assert!(matches!(
        from_pixels(vec![0u8; 13], Shape::new(2, 2)),
        Err(RevealError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_from_pixels_is_row_major_rgb() {
    let bytes: Vec<u8> = (0u8..12).collect();
    let image = from_pixels(bytes, Shape::new(2, 2)).unwrap();
    assert_eq!(image.get_pixel(1, 0).0, [3, 4, 5]);
    assert_eq!(image.get_pixel(0, 1).0, [6, 7, 8]);
}

#[test]
fn test_unrecognized_bytes_are_codec_failure() {
    let err = to_pixels_from_memory(b"definitely not an image").unwrap_err();
    assert!(matches!(err, RevealError::Codec(_)));
}

#[test]
fn test_truncated_container_fails() {
    let png = encode_png(&common::gradient(8, 8, 1)).unwrap();
    assert!(to_pixels_from_memory(&png[..png.len() / 2]).is_err());
}

#[test]
fn test_path_and_memory_decoding_agree() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("g.png");
    let image = common::gradient(5, 3, 200);
    common::write_png(&path, &image);

    let from_disk = to_pixels_from_path(&path).unwrap();
    assert_eq!(from_disk.bytes, image.into_raw());
}

#[test]
fn test_crc32_matches_known_value() {
    assert_eq!(crc32(b"IEND"), 0xae42_6082);
}

#[test]
fn test_exif_orientation_is_applied() {
    let sideways = common::gradient(3, 2, 10);
    let png = with_exif_orientation(&encode_png(&sideways).unwrap(), 6);

    let pixels = to_pixels_from_memory(&png).unwrap();
    assert_eq!(pixels.shape, Shape::new(2, 3));
    assert_eq!(pixels.bytes, image::imageops::rotate90(&sideways).into_raw());
}

#[test]
fn test_exif_orientation_on_a_single_row() {
    let image = RgbImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
    let png = with_exif_orientation(&encode_png(&image).unwrap(), 6);

    let pixels = to_pixels_from_memory(&png).unwrap();
    assert_eq!(pixels.shape, Shape::new(1, 2));
    assert_eq!(pixels.bytes, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_upright_orientation_tag_is_a_no_op() {
    let image = common::gradient(3, 2, 10);
    let png = with_exif_orientation(&encode_png(&image).unwrap(), 1);

    let pixels = to_pixels_from_memory(&png).unwrap();
    assert_eq!(pixels.shape, Shape::new(3, 2));
    assert_eq!(pixels.bytes, image.into_raw());
}
