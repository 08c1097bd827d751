// src/export/data_uri.rs
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::consts::OUTPUT_MEDIA_TYPE;
use crate::error::{Result, RevealError};

/// `data:image/png;base64,<payload>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUri(String);

impl DataUri {
    /// Wrap encoded PNG bytes
    pub fn from_png(png: &[u8]) -> Self {
        DataUri(format!(
            "data:{OUTPUT_MEDIA_TYPE};base64,{}",
            STANDARD.encode(png)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Media type between `data:` and `;base64,`
    pub fn media_type(&self) -> Option<&str> {
        self.0.strip_prefix("data:")?.split_once(";base64,").map(|(mt, _)| mt)
    }

    /// Decode the embedded container bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        let (_, payload) = self
            .0
            .split_once(";base64,")
            .ok_or_else(|| RevealError::Codec("data URI has no base64 payload".into()))?;
        STANDARD
            .decode(payload)
            .map_err(|e| RevealError::Codec(format!("data URI payload: {e}")))
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
