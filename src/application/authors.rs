//! Author resolution.
//!
//! Authors are read-only projections over taxonomy terms attached to a
//! content item under the dedicated authors taxonomy. The provider seam
//! keeps the backing strategy pluggable: callers only ever see
//! `Arc<dyn Author>` values in relation order.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::application::entity::ContentEntity;
use crate::application::store::{ArchiveUrlBuilder, ContentStore, StoreError};
use crate::domain::entities::{ContentRecord, TermRecord};
use crate::domain::types::ContentKind;

/// Taxonomy holding author terms.
pub const AUTHOR_TAXONOMY: &str = "authors";

/// Term metadata key referencing the author's profile image attachment.
pub const AUTHOR_IMAGE_META: &str = "featured_image";

/// A single author of a content item.
#[async_trait]
pub trait Author: Send + Sync {
    /// Identifier of the backing term (or equivalent) record.
    fn term_id(&self) -> i64;

    /// Human friendly display name, unescaped.
    fn name(&self) -> &str;

    fn slug(&self) -> &str;

    /// Description as HTML valid inside a block context. Plain text is
    /// paragraph-wrapped by the author record at save time; no
    /// sanitization happens at read time.
    fn description(&self) -> &str;

    /// The relation's cached count field, not a live recount. May be
    /// stale until the storage collaborator's own invalidation runs.
    fn posts_count(&self) -> u64;

    /// URL of the author's posts archive.
    fn archive_url(&self) -> String;

    /// The attachment record of the author's profile image, or `None`
    /// when no image is associated or the reference does not resolve.
    async fn image(&self) -> Result<Option<ContentRecord>, StoreError>;
}

/// Resolves the ordered authors of a content entity.
#[async_trait]
pub trait AuthorProvider: Send + Sync {
    /// Ordered author list, possibly empty. Ordering is the storage
    /// relation's natural order and is preserved as-is.
    async fn authors_for(
        &self,
        entity: &ContentEntity,
    ) -> Result<Vec<Arc<dyn Author>>, StoreError>;
}

/// Author backed by a taxonomy term.
pub struct TaxonomyAuthor {
    term: TermRecord,
    store: Arc<dyn ContentStore>,
    urls: Arc<dyn ArchiveUrlBuilder>,
}

impl TaxonomyAuthor {
    /// Wrap a term record as an author.
    ///
    /// A term from outside the authors taxonomy is an integrity mismatch
    /// in the tagging data, logged and then used as a valid author
    /// anyway so page rendering never breaks over it.
    pub fn new(
        term: TermRecord,
        store: Arc<dyn ContentStore>,
        urls: Arc<dyn ArchiveUrlBuilder>,
    ) -> Self {
        if term.taxonomy != AUTHOR_TAXONOMY {
            warn!(
                term_id = term.id,
                taxonomy = %term.taxonomy,
                "term does not belong to the authors taxonomy; treating it as an author anyway"
            );
        }
        Self { term, store, urls }
    }

    pub fn term(&self) -> &TermRecord {
        &self.term
    }
}

#[async_trait]
impl Author for TaxonomyAuthor {
    fn term_id(&self) -> i64 {
        self.term.id
    }

    fn name(&self) -> &str {
        &self.term.name
    }

    fn slug(&self) -> &str {
        &self.term.slug
    }

    fn description(&self) -> &str {
        &self.term.description
    }

    fn posts_count(&self) -> u64 {
        self.term.count
    }

    fn archive_url(&self) -> String {
        self.urls.archive_url(self.term.id, &self.term.slug)
    }

    async fn image(&self) -> Result<Option<ContentRecord>, StoreError> {
        let Some(raw) = self
            .store
            .fetch_metadata(self.term.id, AUTHOR_IMAGE_META)
            .await?
        else {
            return Ok(None);
        };

        // Junk metadata values degrade to "no image".
        let Ok(attachment_id) = raw.trim().parse::<i64>() else {
            return Ok(None);
        };
        if attachment_id <= 0 {
            return Ok(None);
        }

        let Some(record) = self.store.fetch_content(attachment_id).await? else {
            return Ok(None);
        };
        if record.kind != ContentKind::Attachment {
            return Ok(None);
        }
        Ok(Some(record))
    }
}

/// Author provider over the authors taxonomy relation.
pub struct TaxonomyAuthorProvider {
    store: Arc<dyn ContentStore>,
    urls: Arc<dyn ArchiveUrlBuilder>,
}

impl TaxonomyAuthorProvider {
    pub fn new(store: Arc<dyn ContentStore>, urls: Arc<dyn ArchiveUrlBuilder>) -> Self {
        Self { store, urls }
    }

    /// Build a single author on demand from a term lookup, for callers
    /// that hold a term id rather than a tagged content item.
    pub async fn author_for_term(
        &self,
        term_id: i64,
    ) -> Result<Option<Arc<dyn Author>>, StoreError> {
        let Some(term) = self.store.fetch_term(term_id).await? else {
            return Ok(None);
        };
        Ok(Some(Arc::new(TaxonomyAuthor::new(
            term,
            Arc::clone(&self.store),
            Arc::clone(&self.urls),
        )) as Arc<dyn Author>))
    }
}

#[async_trait]
impl AuthorProvider for TaxonomyAuthorProvider {
    async fn authors_for(
        &self,
        entity: &ContentEntity,
    ) -> Result<Vec<Arc<dyn Author>>, StoreError> {
        let terms = self.store.terms_for(entity.id(), AUTHOR_TAXONOMY).await?;
        Ok(terms
            .into_iter()
            .map(|term| {
                Arc::new(TaxonomyAuthor::new(
                    term,
                    Arc::clone(&self.store),
                    Arc::clone(&self.urls),
                )) as Arc<dyn Author>
            })
            .collect())
    }
}
