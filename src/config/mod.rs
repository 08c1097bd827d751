// src/config/mod.rs
//! Configuration system for pixel-vault
//!
//! TOML file + env overrides, validated into immutable [`CipherParams`]
//! that get injected into the pipeline.

pub use app::{load, load_with, locate_config_file, Cipher, Config, Limits, SourceSection};
pub use params::CipherParams;

mod app;
mod defaults;
mod params;
