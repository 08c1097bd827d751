// src/consts.rs
//! Shared constants — cipher parameters and defaults

/// PBKDF2-HMAC-SHA256 work factor.
// Must match the sealing side exactly or the derived key is unrelated.
pub const KDF_ITERATIONS: u32 = 100_000;

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

/// CTR initial counter block length in bytes
pub const NONCE_LEN: usize = 16;

/// Shortest salt accepted from configuration
pub const MIN_SALT_LEN: usize = 8;

/// Pixel buffers are always packed RGB
pub const CHANNELS: usize = 3;

/// Media type of every revealed image
pub const OUTPUT_MEDIA_TYPE: &str = "image/png";

/// Default ciphertext location, relative to the working directory
pub const DEFAULT_SOURCE_DIR: &str = "encrypted-images";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pixel-vault.toml";

/// BLAKE3 derive-key context for batch cache fingerprints
pub const CACHE_FINGERPRINT_CONTEXT: &str = "pixel-vault 2025-10 batch cache fingerprint v1";

// Environment variables
pub const ENV_CONFIG: &str = "PV_CONFIG";
pub const ENV_SALT: &str = "PV_SALT";
pub const ENV_NONCE: &str = "PV_NONCE";
pub const ENV_SOURCE: &str = "PV_SOURCE";
pub const ENV_KDF_DEADLINE_MS: &str = "PV_KDF_DEADLINE_MS";

/// Default number of batches a [`crate::cache::BatchCache`] keeps
pub const DEFAULT_CACHE_ENTRIES: usize = 32;
