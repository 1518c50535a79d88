//! Optional memo of derived keys.
//!
//! Derivation costs 100k PBKDF2 rounds, which adds up when a list of entries
//! is decrypted on every page load. The cache trades that for holding keys in
//! memory until [`KeyCache::forget`] is called on sign-out. Entries are
//! indexed by SHA-256 of the identifier so the identifier itself is not held.
//!
//! A cache is bound to one set of [`KdfParams`] for its whole life, so a hit
//! always returns the key a fresh derivation would produce.

use crate::error::CryptoResult;
use crate::key::{DerivedKey, KdfParams, derive_key};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

type CacheSlot = [u8; 32];

#[derive(Default)]
struct Slots {
    keys: HashMap<CacheSlot, DerivedKey>,
    /// Bumped by every invalidation. A derivation that started before an
    /// invalidation must not insert its key.
    generation: u64,
}

/// Thread-safe identifier → key memo.
pub struct KeyCache {
    params: KdfParams,
    slots: RwLock<Slots>,
}

impl Default for KeyCache {
    fn default() -> Self {
        Self::new(KdfParams::default())
    }
}

fn slot(user_id: &str) -> CacheSlot {
    Sha256::digest(user_id.as_bytes()).into()
}

impl KeyCache {
    pub fn new(params: KdfParams) -> Self {
        Self {
            params,
            slots: RwLock::new(Slots::default()),
        }
    }

    pub fn params(&self) -> &KdfParams {
        &self.params
    }

    /// Returns the cached key for `user_id`, deriving and storing it on a miss.
    ///
    /// Derivation runs without the lock held. If [`forget`](Self::forget) or
    /// [`clear`](Self::clear) runs meanwhile, the key is returned but not
    /// cached.
    pub fn get_or_derive(&self, user_id: &str) -> CryptoResult<DerivedKey> {
        let slot = slot(user_id);
        let generation = match self.lookup(&slot) {
            Ok(key) => return Ok(key),
            Err(generation) => generation,
        };

        let key = derive_key(user_id, &self.params)?;
        if self.store(slot, &key, generation) {
            debug!("derived and cached content key");
        }
        Ok(key)
    }

    /// Cached key, or the current generation on a miss.
    fn lookup(&self, slot: &CacheSlot) -> Result<DerivedKey, u64> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.keys.get(slot).cloned().ok_or(slots.generation)
    }

    /// Inserts `key` unless the cache was invalidated since `seen_generation`.
    fn store(&self, slot: CacheSlot, key: &DerivedKey, seen_generation: u64) -> bool {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if slots.generation != seen_generation {
            debug!("key cache invalidated during derivation, key not cached");
            return false;
        }
        slots.keys.insert(slot, key.clone());
        true
    }

    /// Drops the key for one identifier. Call on sign-out.
    pub fn forget(&self, user_id: &str) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.keys.remove(&slot(user_id));
        slots.generation = slots.generation.wrapping_add(1);
    }

    /// Drops every cached key.
    pub fn clear(&self) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.keys.clear();
        slots.generation = slots.generation.wrapping_add(1);
    }

    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
