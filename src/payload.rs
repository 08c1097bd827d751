// src/payload.rs
//! Ciphertext and plaintext pixel buffers with their geometry

use std::fmt;

use crate::consts::CHANNELS;
use crate::error::{Result, RevealError};

/// Width × height of a packed RGB buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub width: u32,
    pub height: u32,
}

impl Shape {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Exact byte length `width * height * 3`, or `None` on overflow
    pub fn byte_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(CHANNELS)
    }

    /// Fail with [`RevealError::ShapeMismatch`] unless `len` is exactly [`Shape::byte_len`]
    pub fn check(&self, len: usize) -> Result<()> {
        match self.byte_len() {
            Some(expected) if expected == len => Ok(()),
            Some(expected) => Err(RevealError::ShapeMismatch {
                expected,
                actual: len,
            }),
            None => Err(RevealError::ShapeMismatch {
                expected: usize::MAX,
                actual: len,
            }),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, CHANNELS)
    }
}

/// Raw ciphertext bytes read from one source item, plus the shape they reshape into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiphertextPayload {
    name: String,
    bytes: Vec<u8>,
    shape: Shape,
}

impl CiphertextPayload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, shape: Shape) -> Result<Self> {
        shape.check(bytes.len())?;
        Ok(Self {
            name: name.into(),
            bytes,
            shape,
        })
    }

    /// File name of the item this payload was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn into_parts(self) -> (String, Vec<u8>, Shape) {
        (self.name, self.bytes, self.shape)
    }
}

/// Decrypted row-major RGB triples, same length as the ciphertext it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedPixelBuffer {
    bytes: Vec<u8>,
    shape: Shape,
}

impl DecryptedPixelBuffer {
    pub fn new(bytes: Vec<u8>, shape: Shape) -> Result<Self> {
        shape.check(bytes.len())?;
        Ok(Self { bytes, shape })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
