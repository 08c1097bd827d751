// src/lib.rs
//! pixel-vault — reveal images sealed as raw, passkey-encrypted pixels
//!
//! Features:
//! - PBKDF2-HMAC-SHA256 key derivation (100 000 rounds)
//! - AES-256-CTR over packed RGB pixel buffers
//! - Deterministic (lexicographic) batch loading
//! - Lossless PNG output as `data:` URIs
//! - Full secure-gate integration for passkeys and keys

pub mod aliases;
pub mod batch;
pub mod cache;
pub mod codec;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod export;
pub mod payload;
pub mod pipeline;
pub mod seal;

pub mod error;

// Re-export everything users need at the crate root
pub use aliases::{DerivedKey32, Nonce16, Passkey};
pub use batch::Source;
pub use cache::BatchCache;
pub use config::{load as load_config, CipherParams, Config};
pub use error::{Result, RevealError};
pub use export::DataUri;
pub use payload::{CiphertextPayload, DecryptedPixelBuffer, Shape};
pub use pipeline::{BatchResult, Pipeline};

/// Reveal the configured source in one call.
///
/// Configuration is validated before the source is resolved, so a missing
/// salt or nonce fails without any file I/O.
pub fn reveal(config: &Config, passkey: &Passkey) -> Result<BatchResult> {
    let pipeline = Pipeline::from_config(config)?;
    pipeline.run_path(&config.source.path, passkey)
}
