//! Cache configuration.

use std::num::NonZeroUsize;

use serde::Deserialize;

const DEFAULT_ENTITY_LIMIT: usize = 500;

/// Entity cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the shared entity cache. When disabled every `get` is a
    /// miss and `insert` is a no-op, so loads always reach storage.
    pub enable_entity_cache: bool,
    /// Maximum raw snapshots held before LRU eviction.
    pub entity_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable_entity_cache: true,
            entity_limit: DEFAULT_ENTITY_LIMIT,
        }
    }
}

impl CacheConfig {
    /// Returns the entity limit as NonZeroUsize, clamping to 1 if zero.
    pub fn entity_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.entity_limit).unwrap_or(NonZeroUsize::MIN)
    }
}
