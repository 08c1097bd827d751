// src/cache.rs
//! Memoised batch results keyed by (source path, passkey fingerprint)
//!
//! At most one computation runs per key: concurrent identical requests block
//! on the same cell instead of each paying for key derivation. Failed
//! computations drop their slot so the next request retries. Wrong passkeys
//! produce batches too, so the cache is bounded and evicts oldest first.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::aliases::Passkey;
use crate::batch::Source;
use crate::config::CipherParams;
use crate::consts::{CACHE_FINGERPRINT_CONTEXT, DEFAULT_CACHE_ENTRIES};
use crate::error::Result;
use crate::pipeline::{BatchResult, Pipeline};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    source: PathBuf,
    fingerprint: [u8; 32],
}

type Slot = Arc<OnceCell<Arc<BatchResult>>>;

#[derive(Debug, Default)]
struct Slots {
    map: HashMap<CacheKey, Slot>,
    // Insertion order, oldest first
    order: VecDeque<CacheKey>,
}

impl Slots {
    fn remove(&mut self, key: &CacheKey) {
        self.map.remove(key);
        self.order.retain(|k| k != key);
    }
}

/// Bounded cache; the oldest entry is evicted once `max_entries` is reached.
#[derive(Debug)]
pub struct BatchCache {
    slots: Mutex<Slots>,
    max_entries: usize,
}

impl Default for BatchCache {
    fn default() -> Self {
        Self::with_max_entries(DEFAULT_CACHE_ENTRIES)
    }
}

impl BatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `max_entries` batches (at least one)
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            slots: Mutex::new(Slots::default()),
            max_entries: max_entries.max(1),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Cached [`Pipeline::run`]
    pub fn get_or_reveal(
        &self,
        pipeline: &Pipeline,
        source: &Source,
        passkey: &Passkey,
    ) -> Result<Arc<BatchResult>> {
        let fingerprint = fingerprint(pipeline.params(), passkey);
        self.get_or_try_insert_with(source, fingerprint, || pipeline.run(source, passkey))
    }

    /// Return the cached batch for `(source, fingerprint)` or compute it once with `compute`.
    pub fn get_or_try_insert_with<F>(
        &self,
        source: &Source,
        fingerprint: [u8; 32],
        compute: F,
    ) -> Result<Arc<BatchResult>>
    where
        F: FnOnce() -> Result<BatchResult>,
    {
        let key = CacheKey {
            source: source.path().to_path_buf(),
            fingerprint,
        };
        let slot = {
            let mut slots = self.lock();
            match slots.map.get(&key) {
                Some(slot) => Arc::clone(slot),
                None => {
                    while slots.map.len() >= self.max_entries {
                        let Some(oldest) = slots.order.pop_front() else {
                            break;
                        };
                        slots.map.remove(&oldest);
                        debug!("batch cache evicted {}", oldest.source.display());
                    }
                    let slot = Slot::default();
                    slots.map.insert(key.clone(), Arc::clone(&slot));
                    slots.order.push_back(key.clone());
                    slot
                }
            }
        };

        let outcome = slot
            .get_or_try_init(|| {
                debug!("batch cache miss for {source}");
                compute().map(Arc::new)
            })
            .cloned();

        if outcome.is_err() {
            let mut slots = self.lock();
            // Only drop our own slot; it may already have been evicted and replaced
            if slots.map.get(&key).is_some_and(|s| Arc::ptr_eq(s, &slot)) {
                slots.remove(&key);
            }
        }
        outcome
    }

    /// Number of cached or in-flight batches
    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut slots = self.lock();
        slots.map.clear();
        slots.order.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keyed BLAKE3 over (salt, nonce, passkey); never the passkey itself
pub fn fingerprint(params: &CipherParams, passkey: &Passkey) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new_derive_key(CACHE_FINGERPRINT_CONTEXT);
    hasher.update(&(params.salt().len() as u64).to_le_bytes());
    hasher.update(params.salt());
    hasher.update(params.nonce().expose_secret());
    hasher.update(passkey.expose_secret().as_bytes());
    *hasher.finalize().as_bytes()
}
