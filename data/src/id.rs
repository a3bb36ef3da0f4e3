//! Unique ID generation for fixture records.
//!
//! Counters are keyed by a cache key so independent sequences (for instance one per
//! model primary key) each start at 1. The process-wide generator is never reset;
//! tests that need deterministic IDs should construct their own `IdGenerator` and pass
//! it to `create_database_with`.

use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, Mutex, PoisonError},
};

/// Cache key used when no explicit key is given.
pub const DEFAULT_CACHE_KEY: &str = "$RT$";

static GLOBAL: LazyLock<IdGenerator> = LazyLock::new(IdGenerator::new);

/// Registry of monotonically increasing counters keyed by cache key.
///
/// Clones share the same counters, so a generator handed to a database and kept by the
/// test observe the same sequence.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    counters: Arc<Mutex<HashMap<String, u64>>>,
}

impl IdGenerator {
    /// Creates a generator with no issued IDs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide generator backing `generate_id` and `next_id`.
    pub fn global() -> &'static IdGenerator {
        &GLOBAL
    }

    /// Returns the next ID for `cache_key`, starting at 1.
    ///
    /// # Arguments
    /// - `cache_key` - Namespace of the counter to advance
    ///
    /// # Returns
    /// - `u64` - Next unique value for the key
    pub fn generate(&self, cache_key: &str) -> u64 {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let counter = counters.entry(cache_key.to_string()).or_insert(0);
        *counter += 1;

        *counter
    }

    /// Last ID issued for `cache_key`, if any.
    pub fn current(&self, cache_key: &str) -> Option<u64> {
        self.counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(cache_key)
            .copied()
    }
}

/// Returns the next ID for `cache_key` from the process-wide generator.
pub fn generate_id(cache_key: &str) -> u64 {
    IdGenerator::global().generate(cache_key)
}

/// Returns the next ID under the default cache key.
pub fn next_id() -> u64 {
    generate_id(DEFAULT_CACHE_KEY)
}
