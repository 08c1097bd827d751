// src/export/json.rs
use crate::error::Result;
use crate::pipeline::BatchResult;

/// Compact `{"images": [...]}` response body
pub fn to_json_response(batch: &BatchResult) -> Result<String> {
    Ok(serde_json::to_string(batch)?)
}

/// Pretty-printed variant for terminals
pub fn to_json_response_pretty(batch: &BatchResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(batch)?)
}
