// src/codec.rs
//! Image container ↔ flat RGB pixel buffer
//!
//! Decoding honours embedded orientation metadata, drops alpha and widens
//! grayscale/indexed formats so every buffer is packed 8-bit RGB. Encoding
//! always writes PNG, which round-trips pixel values exactly.

use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageEncoder, ImageReader, RgbImage};

use crate::error::{Result, RevealError};
use crate::payload::Shape;

/// Flattened pixels of one decoded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub bytes: Vec<u8>,
    pub shape: Shape,
}

/// Open an image file and flatten it to upright RGB
pub fn to_pixels_from_path(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let reader = ImageReader::open(path.as_ref())?.with_guessed_format()?;
    decode_upright(reader)
}

/// Decode an in-memory image container and flatten it to upright RGB
pub fn to_pixels_from_memory(data: &[u8]) -> Result<PixelBuffer> {
    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    decode_upright(reader)
}

/// Flatten an already decoded image to RGB (no orientation handling)
pub fn to_pixels(image: DynamicImage) -> PixelBuffer {
    let rgb = image.into_rgb8();
    let shape = Shape::new(rgb.width(), rgb.height());
    PixelBuffer {
        bytes: rgb.into_raw(),
        shape,
    }
}

/// Reshape a flat RGB buffer into an image; exact inverse of [`to_pixels`]
pub fn from_pixels(bytes: Vec<u8>, shape: Shape) -> Result<RgbImage> {
    shape.check(bytes.len())?;
    RgbImage::from_raw(shape.width, shape.height, bytes).ok_or_else(|| {
        RevealError::Codec(format!("pixel buffer does not fit a {shape} image"))
    })
}

/// Encode an RGB image as PNG bytes
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

fn decode_upright<R: BufRead + Seek>(reader: ImageReader<R>) -> Result<PixelBuffer> {
    if reader.format().is_none() {
        return Err(RevealError::Codec("unrecognized image container".into()));
    }
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(to_pixels(image))
}
