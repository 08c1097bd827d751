// src/crypto/stream.rs
//! AES-256-CTR keystream
//!
//! The whole buffer is one stream starting at the nonce; the counter is the
//! full 128-bit block, big-endian. Every call builds a fresh cipher, so each
//! buffer in a batch restarts from the same counter value.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};

use crate::aliases::{DerivedKey32, Nonce16};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// XOR the keystream for `(key, nonce)` into `buf` in place.
///
/// Encryption and decryption are the same operation.
pub fn apply_keystream(buf: &mut [u8], key: &DerivedKey32, nonce: &Nonce16) {
    let mut cipher = Aes256Ctr::new(key.expose_secret().into(), nonce.expose_secret().into());
    cipher.apply_keystream(buf);
}

/// Decrypt ciphertext → plaintext of identical length
pub fn decrypt_to_vec(ciphertext: &[u8], key: &DerivedKey32, nonce: &Nonce16) -> Vec<u8> {
    let mut out = ciphertext.to_vec();
    apply_keystream(&mut out, key, nonce);
    out
}

/// Encrypt plaintext → ciphertext of identical length
pub fn encrypt_to_vec(plaintext: &[u8], key: &DerivedKey32, nonce: &Nonce16) -> Vec<u8> {
    decrypt_to_vec(plaintext, key, nonce)
}
