// src/export/mod.rs
//! Response encodings for revealed images
//!
//! Each image becomes a self-describing `data:` URI; a batch becomes the
//! `{"images": [...]}` JSON body.

pub use data_uri::DataUri;
pub use json::{to_json_response, to_json_response_pretty};

pub mod data_uri;
pub mod json;
