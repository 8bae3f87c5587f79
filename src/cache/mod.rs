//! Shared entity cache.
//!
//! A process-wide, read-through cache mapping content-item ids to their
//! canonical raw snapshots. The loader populates it lazily on a `get`
//! miss; external writers call `invalidate` after a successful update or
//! delete. There is no write-through path.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! enable_entity_cache = true
//! entity_limit = 500
//! ```

mod config;
mod lock;
mod store;

pub use config::CacheConfig;
pub use store::EntityStore;
