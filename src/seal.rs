// src/seal.rs
//! Sealing: the forward direction of the reveal path
//!
//! Produces ciphertext images that [`crate::pipeline::Pipeline`] reveals.
//! Uses the same key derivation, keystream and codec; the output container
//! is always PNG so ciphertext bytes survive storage untouched.

use std::path::Path;

use image::{DynamicImage, RgbImage};
use tracing::info;

use crate::aliases::{DerivedKey32, Passkey};
use crate::codec::{encode_png, from_pixels, to_pixels, to_pixels_from_path, PixelBuffer};
use crate::config::CipherParams;
use crate::crypto::{apply_keystream, derive_key};
use crate::error::Result;

/// Encrypt a flattened RGB buffer into a ciphertext image of the same shape
pub fn seal_pixels(
    pixels: PixelBuffer,
    key: &DerivedKey32,
    params: &CipherParams,
) -> Result<RgbImage> {
    let PixelBuffer { mut bytes, shape } = pixels;
    apply_keystream(&mut bytes, key, params.nonce());
    from_pixels(bytes, shape)
}

/// Seal a decoded image with a passkey
pub fn seal_image(
    image: DynamicImage,
    passkey: &Passkey,
    params: &CipherParams,
) -> Result<RgbImage> {
    let key = derive_key(passkey, params.salt());
    seal_pixels(to_pixels(image), &key, params)
}

/// Seal every input file in order with one derived key, writing PNG ciphertexts.
///
/// `outputs` pairs 1:1 with `inputs`.
pub fn seal_files<I, O>(
    pairs: impl IntoIterator<Item = (I, O)>,
    passkey: &Passkey,
    params: &CipherParams,
) -> Result<usize>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    let key = derive_key(passkey, params.salt());
    let mut sealed = 0;
    for (input, output) in pairs {
        let pixels = to_pixels_from_path(input.as_ref())?;
        let image = seal_pixels(pixels, &key, params)?;
        std::fs::write(output.as_ref(), encode_png(&image)?)?;
        info!("sealed {} → {}", input.as_ref().display(), output.as_ref().display());
        sealed += 1;
    }
    Ok(sealed)
}

/// Seal a single image file to a PNG ciphertext
pub fn seal_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    passkey: &Passkey,
    params: &CipherParams,
) -> Result<()> {
    seal_files([(input, output)], passkey, params).map(|_| ())
}
