//! Collaborator seams the core is implemented against.
//!
//! Storage, sanitization, image resolution and URL building are external
//! concerns: the core only reads through them and treats their latency as
//! opaque. No retries are performed here; timeout policy belongs to the
//! collaborator.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{ContentRecord, ImageSource, ResponsiveImage, TermRecord};
use crate::domain::types::SanitizeContext;

/// The only hard failures in the crate: the storage collaborator itself
/// being unreachable or misbehaving. Everything else degrades gracefully.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Storage lookup collaborator.
///
/// Metadata is keyed by owner id in a single namespace shared by content
/// items and taxonomy terms, matching the storage collaborator's flat
/// metadata table.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn fetch_content(&self, id: i64) -> Result<Option<ContentRecord>, StoreError>;

    async fn fetch_term(&self, id: i64) -> Result<Option<TermRecord>, StoreError>;

    async fn fetch_metadata(&self, owner_id: i64, key: &str)
    -> Result<Option<String>, StoreError>;

    /// Terms attached to a content item under the given taxonomy, in the
    /// relation's natural (insertion) order. Callers must not re-sort.
    async fn terms_for(
        &self,
        content_id: i64,
        taxonomy: &str,
    ) -> Result<Vec<TermRecord>, StoreError>;
}

/// Sanitization pipeline. Applied only for non-raw contexts; the raw
/// snapshot always bypasses it.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, field: &str, value: &str, owner_id: i64, context: SanitizeContext)
    -> String;
}

/// Image resolution collaborator.
///
/// Both operations are absence-tolerant by contract: an attachment that
/// cannot be resolved to pixel data is `None`, never an error, so avatar
/// rendering can degrade instead of failing.
#[async_trait]
pub trait ImageResolver: Send + Sync {
    async fn resolve_source(
        &self,
        attachment_id: i64,
        width: u32,
        height: u32,
    ) -> Option<ImageSource>;

    /// Responsive size-variant attributes derived from the attachment's
    /// stored metadata. `None` when that metadata is absent.
    async fn responsive_metadata(
        &self,
        attachment_id: i64,
        source: &ImageSource,
    ) -> Option<ResponsiveImage>;
}

/// Author-archive permalink builder. The URL scheme is opaque to this
/// crate.
pub trait ArchiveUrlBuilder: Send + Sync {
    fn archive_url(&self, term_id: i64, slug: &str) -> String;
}

/// A sanitizer that returns values unchanged. Useful for embedders whose
/// save pipeline already guarantees clean fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughSanitizer;

impl Sanitizer for PassthroughSanitizer {
    fn sanitize(
        &self,
        _field: &str,
        value: &str,
        _owner_id: i64,
        _context: SanitizeContext,
    ) -> String {
        value.to_string()
    }
}
