// src/config/params.rs
//! Validated, immutable salt + nonce for one deployment

use std::fmt;

use crate::aliases::Nonce16;
use crate::consts::{MIN_SALT_LEN, NONCE_LEN};
use crate::error::{Result, RevealError};

/// Process-wide cipher parameters, read-only after construction
pub struct CipherParams {
    salt: Vec<u8>,
    nonce: Nonce16,
}

impl CipherParams {
    pub fn new(salt: Vec<u8>, nonce: [u8; NONCE_LEN]) -> Result<Self> {
        if salt.len() < MIN_SALT_LEN {
            return Err(RevealError::MalformedConfiguration(format!(
                "salt must be at least {MIN_SALT_LEN} bytes, got {}",
                salt.len()
            )));
        }
        Ok(Self {
            salt,
            nonce: Nonce16::new(nonce),
        })
    }

    /// Parse hex salt and nonce; a missing value is a configuration error.
    pub fn from_hex(salt_hex: Option<&str>, nonce_hex: Option<&str>) -> Result<Self> {
        let salt = decode_hex("salt", salt_hex)?;
        let nonce = decode_hex("nonce", nonce_hex)?;
        let nonce: [u8; NONCE_LEN] = nonce.as_slice().try_into().map_err(|_| {
            RevealError::MalformedConfiguration(format!(
                "nonce must be exactly {NONCE_LEN} bytes, got {}",
                nonce.len()
            ))
        })?;
        Self::new(salt, nonce)
    }

    /// Fresh random 16-byte salt and nonce for provisioning a new deployment
    pub fn generate() -> Self {
        Self {
            salt: rand::random::<[u8; 16]>().to_vec(),
            nonce: Nonce16::new(rand::random::<[u8; NONCE_LEN]>()),
        }
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn nonce(&self) -> &Nonce16 {
        &self.nonce
    }

    pub fn salt_hex(&self) -> String {
        hex::encode(&self.salt)
    }

    pub fn nonce_hex(&self) -> String {
        hex::encode(self.nonce.expose_secret())
    }
}

impl fmt::Debug for CipherParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherParams")
            .field("salt_len", &self.salt.len())
            .finish_non_exhaustive()
    }
}

fn decode_hex(what: &str, value: Option<&str>) -> Result<Vec<u8>> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RevealError::MalformedConfiguration(format!("{what} is not configured")))?;
    hex::decode(value)
        .map_err(|e| RevealError::MalformedConfiguration(format!("{what} is not valid hex: {e}")))
}
