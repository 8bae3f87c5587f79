//! Cache storage for raw content snapshots.

use std::sync::RwLock;

use lru::LruCache;
use metrics::counter;

use crate::domain::entities::ContentRecord;

use super::config::CacheConfig;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

/// Shared raw-snapshot cache keyed by content-item id.
///
/// Read-through only: the entity loader populates it on a miss, and
/// external writers invalidate after a successful update or delete.
/// Reads clone the snapshot out, so cached entries are never handed to
/// callers by reference and copy-on-write views stay cheap to produce.
/// Concurrent readers are expected; writers are rare and take the same
/// coarse per-store lock.
pub struct EntityStore {
    enabled: bool,
    records: RwLock<LruCache<i64, ContentRecord>>,
}

impl EntityStore {
    /// Create a new entity store with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enable_entity_cache,
            records: RwLock::new(LruCache::new(config.entity_limit_non_zero())),
        }
    }

    pub fn get(&self, id: i64) -> Option<ContentRecord> {
        if !self.enabled {
            return None;
        }
        let hit = rw_write(&self.records, SOURCE, "get").get(&id).cloned();
        if hit.is_some() {
            counter!("masthead_entity_cache_hit_total").increment(1);
        } else {
            counter!("masthead_entity_cache_miss_total").increment(1);
        }
        hit
    }

    pub fn insert(&self, record: ContentRecord) {
        if !self.enabled {
            return;
        }
        let id = record.id;
        let evicted = rw_write(&self.records, SOURCE, "insert").push(id, record);
        if let Some((evicted_id, _)) = evicted
            && evicted_id != id
        {
            counter!("masthead_entity_cache_evict_total").increment(1);
        }
    }

    /// Drop the snapshot for one id. External writers must call this
    /// after any successful update or delete of the underlying record.
    pub fn invalidate(&self, id: i64) {
        rw_write(&self.records, SOURCE, "invalidate").pop(&id);
    }

    /// Clear all cached snapshots.
    pub fn clear(&self) {
        rw_write(&self.records, SOURCE, "clear").clear();
    }

    /// Get the number of cached snapshots.
    pub fn len(&self) -> usize {
        rw_read(&self.records, SOURCE, "len").len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
