//! Domain entities mirrored from persistent storage.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::types::{ContentKind, ContentStatus, SanitizeContext};

/// Canonical snapshot of one content item.
///
/// A record with `context == Some(SanitizeContext::Raw)` is the raw
/// snapshot shared through the entity cache. Records carrying any other
/// context are per-view copies produced by
/// [`ContentEntity::with_context`](crate::application::entity::ContentEntity::with_context)
/// and must never be inserted into the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: i64,
    pub author_id: i64,
    pub parent_id: i64,
    pub status: ContentStatus,
    pub kind: ContentKind,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    /// Sanitization tag applied to the string fields. `None` means the
    /// record came straight from storage and has not been normalized.
    pub context: Option<SanitizeContext>,
}

/// A taxonomy term, the storage backing of a [`TaxonomyAuthor`].
///
/// The term is a read-only projection: the crate holds a copy of the
/// record but never mutates or persists it.
///
/// [`TaxonomyAuthor`]: crate::application::authors::TaxonomyAuthor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: i64,
    pub taxonomy: String,
    pub name: String,
    pub slug: String,
    /// Rendered description, paragraph-wrapped at save time. Returned
    /// as stored; no read-time sanitization.
    pub description: String,
    /// The relation's cached usage count. May be stale until the
    /// storage collaborator's own invalidation runs.
    pub count: u64,
}

/// A resolved image source at a concrete size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Responsive size-variant attributes for an image source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveImage {
    /// Alternate resolutions, e.g. `"/i/7-480.jpg 480w, /i/7-960.jpg 960w"`.
    pub srcset: String,
    /// Usage hint, e.g. `"(max-width: 96px) 100vw, 96px"`.
    pub sizes: String,
}
