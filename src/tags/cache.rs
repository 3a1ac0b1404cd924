//! Process-wide extractor handle
//!
//! The extractor is loaded at most once per process. Concurrent first
//! callers serialize on the slot mutex, so exactly one load happens.

use std::sync::{Arc, Mutex};

use crate::core::config::Config;
use crate::core::error::Result;

use super::extractor::KeyphraseExtractor;

/// Shared, read-only extractor
pub type ExtractorHandle = Arc<KeyphraseExtractor>;

/// Write-once slot for a lazily loaded model
pub struct ModelCache<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> ModelCache<T> {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value, running `init` only if nothing is cached yet.
    /// A failed `init` leaves the slot empty so a later call may retry.
    pub fn get_or_try_init<E, F>(&self, init: F) -> std::result::Result<Arc<T>, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(value) = slot.as_ref() {
            return Ok(Arc::clone(value));
        }

        let value = Arc::new(init()?);
        *slot = Some(Arc::clone(&value));
        Ok(value)
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl<T> Default for ModelCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

static EXTRACTOR: ModelCache<KeyphraseExtractor> = ModelCache::new();

/// Load the extractor on first use and return the shared handle.
///
/// `config` only matters for the call that performs the load.
pub fn initialize(config: &Config) -> Result<ExtractorHandle> {
    EXTRACTOR.get_or_try_init(|| KeyphraseExtractor::from_config(config))
}
