// tests/common.rs
//! Shared test utilities — logging setup and image fixtures
#![allow(dead_code)]

use std::path::Path;

use image::{Rgb, RgbImage};
use pixel_vault::codec::encode_png;
use pixel_vault::config::CipherParams;

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging; call at the start of any test that needs logs
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok(); // idempotent

    #[cfg(not(feature = "logging"))]
    { /* no-op */ }
}

/// 16 zero bytes of salt, 16 zero bytes of nonce
pub fn zero_params() -> CipherParams {
    CipherParams::new(vec![0u8; 16], [0u8; 16]).unwrap()
}

pub fn params_from_hex(salt: &str, nonce: &str) -> CipherParams {
    CipherParams::from_hex(Some(salt), Some(nonce)).unwrap()
}

/// Deterministic gradient so every pixel differs from its neighbours
pub fn gradient(width: u32, height: u32, seed: u8) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x as u8).wrapping_mul(31).wrapping_add(seed),
            (y as u8).wrapping_mul(17).wrapping_add(seed),
            ((x + y) as u8).wrapping_mul(7) ^ seed,
        ])
    })
}

pub fn write_png(path: &Path, image: &RgbImage) {
    std::fs::write(path, encode_png(image).unwrap()).unwrap();
}
