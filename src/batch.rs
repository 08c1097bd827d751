// src/batch.rs
//! Ciphertext source resolution and deterministic batch loading
//!
//! Decrypted images are matched to their originals purely by position, so
//! collection members are always enumerated in byte-wise lexicographic
//! order of their file names.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::codec::to_pixels_from_path;
use crate::error::{Result, RevealError};
use crate::payload::CiphertextPayload;

/// A resolved ciphertext location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    /// One ciphertext image file
    SingleItem(PathBuf),
    /// A directory of ciphertext image files (not recursed)
    Collection(PathBuf),
}

impl Source {
    /// Resolve a path once into a file or directory source.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => RevealError::SourceNotFound {
                path: path.to_path_buf(),
            },
            _ => RevealError::Io(err),
        })?;

        if meta.is_dir() {
            Ok(Source::Collection(path.to_path_buf()))
        } else {
            Ok(Source::SingleItem(path.to_path_buf()))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Source::SingleItem(p) | Source::Collection(p) => p,
        }
    }

    /// Item paths in load order.
    ///
    /// A collection yields its recognized image files sorted by name; other
    /// entries are skipped. A collection with no recognized member is
    /// [`RevealError::SourceNotFound`].
    pub fn members(&self) -> Result<Vec<PathBuf>> {
        match self {
            Source::SingleItem(path) => Ok(vec![path.clone()]),
            Source::Collection(dir) => {
                let mut members = Vec::new();
                for entry in WalkDir::new(dir)
                    .min_depth(1)
                    .max_depth(1)
                    .follow_links(true)
                    .sort_by_file_name()
                {
                    let entry = match entry {
                        Ok(entry) => entry,
                        // Unreadable entries only matter if they would have been members
                        Err(err) => match err.path() {
                            Some(path) if !is_recognized_image(path) => {
                                debug!("skipping unreadable {}", path.display());
                                continue;
                            }
                            _ => return Err(err.into()),
                        },
                    };
                    if entry.file_type().is_file() && is_recognized_image(entry.path()) {
                        members.push(entry.into_path());
                    } else {
                        debug!("skipping {}", entry.path().display());
                    }
                }

                if members.is_empty() {
                    return Err(RevealError::SourceNotFound { path: dir.clone() });
                }
                Ok(members)
            }
        }
    }

    /// Load every member as a ciphertext payload, failing on the first bad item.
    pub fn load(&self) -> Result<Vec<CiphertextPayload>> {
        let payloads = self
            .members()?
            .iter()
            .map(load_payload)
            .collect::<Result<Vec<_>>>()?;
        info!("loaded {} ciphertext item(s) from {}", payloads.len(), self);
        Ok(payloads)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::SingleItem(p) => write!(f, "file {}", p.display()),
            Source::Collection(p) => write!(f, "directory {}", p.display()),
        }
    }
}

/// Read one ciphertext image into its raw bytes and shape
pub fn load_payload(path: impl AsRef<Path>) -> Result<CiphertextPayload> {
    let path = path.as_ref();
    let pixels = to_pixels_from_path(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!("read {} ({})", name, pixels.shape);
    CiphertextPayload::new(name, pixels.bytes, pixels.shape)
}

/// Whether the extension names an image container we can decode
pub fn is_recognized_image(path: &Path) -> bool {
    ImageFormat::from_path(path)
        .map(|format| format.reading_enabled())
        .unwrap_or(false)
}
