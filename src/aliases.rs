//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret types used throughout pixel-vault.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(DerivedKey32, 32); // AES-256 key from PBKDF2-HMAC-SHA256
fixed_alias!(Nonce16, 16); // initial CTR counter block

// Dynamic secrets
dynamic_alias!(Passkey, String); // caller-supplied, never logged
