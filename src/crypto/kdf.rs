// src/crypto/kdf.rs
//! Passkey → AES-256 key derivation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use tracing::{debug, warn};

use crate::aliases::{DerivedKey32, Passkey};
use crate::consts::{KDF_ITERATIONS, KEY_LEN};
use crate::error::{Result, RevealError};

static KDF_TIMEOUTS: AtomicU64 = AtomicU64::new(0);

/// Derive the 32-byte decryption key with PBKDF2-HMAC-SHA256 at [`KDF_ITERATIONS`].
///
/// Deterministic in `(passkey, salt)`. Empty passkeys and empty salts are accepted.
pub fn derive_key(passkey: &Passkey, salt: &[u8]) -> DerivedKey32 {
    derive_key_with_rounds(passkey, salt, KDF_ITERATIONS)
}

/// Same as [`derive_key`] with an explicit round count.
///
/// Only useful for checking against published PBKDF2 vectors; payloads are
/// always sealed with [`KDF_ITERATIONS`].
pub fn derive_key_with_rounds(passkey: &Passkey, salt: &[u8], rounds: u32) -> DerivedKey32 {
    let mut key = DerivedKey32::new([0u8; KEY_LEN]);
    let started = Instant::now();
    pbkdf2_hmac::<Sha256>(
        passkey.expose_secret().as_bytes(),
        salt,
        rounds,
        key.expose_secret_mut(),
    );
    debug!(rounds, elapsed_ms = started.elapsed().as_millis(), "derived key");
    key
}

/// Run [`derive_key`] on a worker thread and give up after `deadline`.
///
/// The worker is detached on timeout: it still burns the full
/// [`KDF_ITERATIONS`] rounds of CPU before dropping the key. Every timeout is
/// counted in [`kdf_timeouts`] and logged with the running total.
pub fn derive_key_with_deadline(
    passkey: &Passkey,
    salt: &[u8],
    deadline: Duration,
) -> Result<DerivedKey32> {
    let (tx, rx) = mpsc::channel();
    let passkey = Passkey::new(passkey.expose_secret().to_owned());
    let salt = salt.to_vec();

    thread::Builder::new()
        .name("pixel-vault-kdf".into())
        .spawn(move || {
            // Receiver may already be gone after a timeout
            let _ = tx.send(derive_key(&passkey, &salt));
        })?;

    match rx.recv_timeout(deadline) {
        Ok(key) => Ok(key),
        Err(RecvTimeoutError::Timeout) => {
            let total = KDF_TIMEOUTS.fetch_add(1, Ordering::Relaxed) + 1;
            warn!(
                deadline_ms = deadline.as_millis(),
                detached_workers_total = total,
                "key derivation deadline exceeded, worker left running to completion"
            );
            Err(RevealError::KdfDeadline {
                deadline_ms: deadline.as_millis(),
            })
        }
        Err(RecvTimeoutError::Disconnected) => Err(RevealError::Io(std::io::Error::other(
            "key derivation worker exited without a result",
        ))),
    }
}

/// Process-wide count of deadline timeouts, i.e. detached derivation workers
pub fn kdf_timeouts() -> u64 {
    KDF_TIMEOUTS.load(Ordering::Relaxed)
}
