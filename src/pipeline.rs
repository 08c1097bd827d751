// src/pipeline.rs
//! Load → derive → decrypt → reshape → encode
//!
//! The pipeline owns only immutable configuration, so one instance can be
//! shared by any number of concurrent requests.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aliases::{DerivedKey32, Passkey};
use crate::batch::{load_payload, Source};
use crate::codec::{encode_png, from_pixels};
use crate::config::{CipherParams, Config};
use crate::crypto::{apply_keystream, derive_key, derive_key_with_deadline};
use crate::error::Result;
use crate::export::DataUri;
use crate::payload::{CiphertextPayload, DecryptedPixelBuffer};

/// Revealed images in the source's load order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub images: Vec<DataUri>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataUri> {
        self.images.iter()
    }
}

impl IntoIterator for BatchResult {
    type Item = DataUri;
    type IntoIter = std::vec::IntoIter<DataUri>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.into_iter()
    }
}

#[derive(Debug)]
pub struct Pipeline {
    params: CipherParams,
    kdf_deadline: Option<Duration>,
}

impl Pipeline {
    pub fn new(params: CipherParams) -> Self {
        Self {
            params,
            kdf_deadline: None,
        }
    }

    pub fn with_kdf_deadline(mut self, deadline: Duration) -> Self {
        self.kdf_deadline = Some(deadline);
        self
    }

    /// Validate salt/nonce from `config`. Fails before any file is touched.
    pub fn from_config(config: &Config) -> Result<Self> {
        let pipeline = Self::new(config.cipher_params()?);
        Ok(match config.kdf_deadline() {
            Some(deadline) => pipeline.with_kdf_deadline(deadline),
            None => pipeline,
        })
    }

    pub fn params(&self) -> &CipherParams {
        &self.params
    }

    /// Derive the request key, honouring the configured deadline
    pub fn derive(&self, passkey: &Passkey) -> Result<DerivedKey32> {
        match self.kdf_deadline {
            Some(deadline) => derive_key_with_deadline(passkey, self.params.salt(), deadline),
            None => Ok(derive_key(passkey, self.params.salt())),
        }
    }

    /// Resolve `path` and reveal everything it holds
    pub fn run_path(&self, path: impl AsRef<Path>, passkey: &Passkey) -> Result<BatchResult> {
        let source = Source::resolve(path)?;
        self.run(&source, passkey)
    }

    /// Reveal every item of `source`; the first failing item aborts the batch.
    ///
    /// A wrong passkey is not detected: it yields well-formed, garbled images.
    pub fn run(&self, source: &Source, passkey: &Passkey) -> Result<BatchResult> {
        let payloads = source.load()?;
        let key = self.derive(passkey)?;

        let images = payloads
            .into_iter()
            .map(|payload| self.reveal_payload(payload, &key))
            .collect::<Result<Vec<_>>>()?;

        info!("revealed {} image(s) from {}", images.len(), source);
        Ok(BatchResult { images })
    }

    /// Reveal every item of `source`, keeping per-item failures in place.
    ///
    /// Source resolution and key derivation errors are still fatal.
    pub fn run_partial(
        &self,
        source: &Source,
        passkey: &Passkey,
    ) -> Result<Vec<Result<DataUri>>> {
        let members = source.members()?;
        let key = self.derive(passkey)?;

        let outcomes: Vec<Result<DataUri>> = members
            .iter()
            .map(|path| {
                load_payload(path).and_then(|payload| self.reveal_payload(payload, &key))
            })
            .inspect(|outcome| {
                if let Err(err) = outcome {
                    warn!("item failed: {err}");
                }
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.is_err()).count();
        info!(
            "revealed {} of {} image(s) from {}",
            outcomes.len() - failed,
            outcomes.len(),
            source
        );
        Ok(outcomes)
    }

    /// Decrypt one payload with a fresh counter starting at the nonce
    pub fn decrypt_payload(
        &self,
        payload: CiphertextPayload,
        key: &DerivedKey32,
    ) -> Result<DecryptedPixelBuffer> {
        let (name, mut bytes, shape) = payload.into_parts();
        apply_keystream(&mut bytes, key, self.params.nonce());
        debug!("decrypted {name} ({shape})");
        DecryptedPixelBuffer::new(bytes, shape)
    }

    fn reveal_payload(&self, payload: CiphertextPayload, key: &DerivedKey32) -> Result<DataUri> {
        let plain = self.decrypt_payload(payload, key)?;
        let shape = plain.shape();
        let image = from_pixels(plain.into_bytes(), shape)?;
        Ok(DataUri::from_png(&encode_png(&image)?))
    }
}
