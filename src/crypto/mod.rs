// src/crypto/mod.rs
//! Pure cryptographic primitives — no I/O, no image handling
//!
//! Everything here works on in-memory buffers.

pub mod kdf;
pub mod stream;

pub use kdf::{derive_key, derive_key_with_deadline, derive_key_with_rounds, kdf_timeouts};
pub use stream::{apply_keystream, decrypt_to_vec, encrypt_to_vec};
