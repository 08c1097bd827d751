// src/config/defaults.rs
use std::path::PathBuf;

use crate::consts::DEFAULT_SOURCE_DIR;

pub fn default_source_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_DIR)
}
