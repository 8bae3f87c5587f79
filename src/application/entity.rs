//! The cache-backed content entity model.
//!
//! [`EntityLoader`] is the factory: it probes the shared snapshot cache,
//! falls back to the storage collaborator, normalizes what it finds to
//! the raw context and caches it. [`ContentEntity`] wraps its own copy
//! of the snapshot plus per-instance memoized derived attributes, so
//! local mutation never reaches the shared cache entry.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::application::authors::{AuthorProvider, TaxonomyAuthorProvider};
use crate::application::avatar::{Avatar, resolve_avatar};
use crate::application::store::{
    ArchiveUrlBuilder, ContentStore, ImageResolver, Sanitizer, StoreError,
};
use crate::cache::EntityStore;
use crate::domain::entities::ContentRecord;
use crate::domain::types::{AttributeValue, SanitizeContext};

/// Taxonomy backing the derived `category_ids` attribute.
pub const CATEGORY_TAXONOMY: &str = "category";

/// Metadata key backing the derived `template` attribute.
const TEMPLATE_META: &str = "_template";

/// Factory for content entities: cache probe, storage fallback, raw
/// normalization.
#[derive(Clone)]
pub struct EntityLoader {
    store: Arc<dyn ContentStore>,
    sanitizer: Arc<dyn Sanitizer>,
    images: Arc<dyn ImageResolver>,
    urls: Arc<dyn ArchiveUrlBuilder>,
    cache: Arc<EntityStore>,
    authors: Arc<dyn AuthorProvider>,
}

impl EntityLoader {
    pub fn new(
        store: Arc<dyn ContentStore>,
        sanitizer: Arc<dyn Sanitizer>,
        images: Arc<dyn ImageResolver>,
        urls: Arc<dyn ArchiveUrlBuilder>,
        cache: Arc<EntityStore>,
    ) -> Self {
        let authors = Arc::new(TaxonomyAuthorProvider::new(
            Arc::clone(&store),
            Arc::clone(&urls),
        ));
        Self {
            store,
            sanitizer,
            images,
            urls,
            cache,
            authors,
        }
    }

    /// Swap the author resolution strategy.
    pub fn with_author_provider(mut self, authors: Arc<dyn AuthorProvider>) -> Self {
        self.authors = authors;
        self
    }

    pub fn cache(&self) -> &Arc<EntityStore> {
        &self.cache
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    pub fn archive_urls(&self) -> &Arc<dyn ArchiveUrlBuilder> {
        &self.urls
    }

    /// Load the entity for `id`, or `None` when no record exists.
    ///
    /// The returned entity always carries a raw-context snapshot; use
    /// [`ContentEntity::with_context`] for sanitized views.
    pub async fn load(&self, id: i64) -> Result<Option<ContentEntity>, StoreError> {
        Ok(self
            .snapshot(id)
            .await?
            .map(|record| ContentEntity::new(self.clone(), record)))
    }

    /// Cache-first raw snapshot fetch.
    async fn snapshot(&self, id: i64) -> Result<Option<ContentRecord>, StoreError> {
        if id <= 0 {
            return Ok(None);
        }

        if let Some(cached) = self.cache.get(id) {
            if cached.context == Some(SanitizeContext::Raw) {
                return Ok(Some(cached));
            }
            // A sanitized copy leaked into the raw cache. Reload rather
            // than trust it.
            debug!(id, "discarding non-raw snapshot found in entity cache");
            self.cache.invalidate(id);
        }

        let Some(fetched) = self.store.fetch_content(id).await? else {
            return Ok(None);
        };

        let mut record = fetched;
        record.context = Some(SanitizeContext::Raw);
        self.cache.insert(record.clone());
        Ok(Some(record))
    }
}

/// In-memory representation of one content item.
///
/// Holds a private copy of the snapshot: mutation through
/// [`record_mut`](Self::record_mut) is copy-on-write with respect to the
/// shared cache. Derived attributes are computed on first access and
/// memoized per instance.
#[derive(Clone)]
pub struct ContentEntity {
    loader: EntityLoader,
    record: ContentRecord,
    ancestors: Option<Vec<i64>>,
    category_ids: Option<Vec<i64>>,
    metadata: HashMap<String, Option<String>>,
}

impl ContentEntity {
    fn new(loader: EntityLoader, record: ContentRecord) -> Self {
        Self {
            loader,
            record,
            ancestors: None,
            category_ids: None,
            metadata: HashMap::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.record.id
    }

    pub fn context(&self) -> Option<SanitizeContext> {
        self.record.context
    }

    pub fn record(&self) -> &ContentRecord {
        &self.record
    }

    /// Mutable access to this instance's snapshot copy. The shared cache
    /// entry is untouched; persisting changes is the job of an external
    /// writer, which must then invalidate the cache.
    pub fn record_mut(&mut self) -> &mut ContentRecord {
        &mut self.record
    }

    /// Read a static or derived attribute by name.
    ///
    /// Derived keys are `ancestors`, `category_ids` and `template`;
    /// anything not otherwise known falls through to a metadata lookup
    /// where an absent key yields an empty string, never an error.
    /// String-valued derived reads pass through the sanitization
    /// pipeline under the entity's non-raw context; numeric id chains
    /// are exempt.
    pub async fn attribute(&mut self, name: &str) -> Result<AttributeValue, StoreError> {
        match name {
            "id" => Ok(AttributeValue::Int(self.record.id)),
            "author_id" => Ok(AttributeValue::Int(self.record.author_id)),
            "parent_id" => Ok(AttributeValue::Int(self.record.parent_id)),
            "status" => Ok(AttributeValue::Text(self.record.status.as_str().into())),
            "kind" => Ok(AttributeValue::Text(self.record.kind.as_str().into())),
            "slug" => Ok(AttributeValue::Text(self.record.slug.clone())),
            "title" => Ok(AttributeValue::Text(self.record.title.clone())),
            "content" => Ok(AttributeValue::Text(self.record.content.clone())),
            "excerpt" => Ok(AttributeValue::Text(self.record.excerpt.clone())),
            "ancestors" => {
                if self.ancestors.is_none() {
                    self.ancestors = Some(self.walk_ancestors().await?);
                }
                Ok(AttributeValue::IntList(
                    self.ancestors.clone().unwrap_or_default(),
                ))
            }
            "category_ids" => {
                if self.category_ids.is_none() {
                    let terms = self
                        .loader
                        .store
                        .terms_for(self.record.id, CATEGORY_TAXONOMY)
                        .await?;
                    self.category_ids = Some(terms.into_iter().map(|term| term.id).collect());
                }
                Ok(AttributeValue::IntList(
                    self.category_ids.clone().unwrap_or_default(),
                ))
            }
            "template" => {
                let value = self.metadata_value(TEMPLATE_META).await?.unwrap_or_default();
                Ok(AttributeValue::Text(self.apply_context(name, value)))
            }
            _ => {
                let value = self.metadata_value(name).await?.unwrap_or_default();
                Ok(AttributeValue::Text(self.apply_context(name, value)))
            }
        }
    }

    /// Whether `attribute(name)` would find anything beyond the
    /// permissive empty default.
    pub async fn has_attribute(&mut self, name: &str) -> Result<bool, StoreError> {
        match name {
            "id" | "author_id" | "parent_id" | "status" | "kind" | "slug" | "title"
            | "content" | "excerpt" | "ancestors" | "category_ids" | "template" => Ok(true),
            _ => Ok(self.metadata_value(name).await?.is_some()),
        }
    }

    /// A new logical view of the same id under a different sanitization
    /// context.
    ///
    /// The raw context always reloads through the loader, reflecting the
    /// latest cached raw snapshot and discarding any sanitized copy this
    /// instance holds. Other contexts re-sanitize every string field and
    /// drop the memoized derived attributes.
    pub async fn with_context(
        &self,
        context: SanitizeContext,
    ) -> Result<Option<ContentEntity>, StoreError> {
        if self.record.context == Some(context) {
            return Ok(Some(self.clone()));
        }

        if context == SanitizeContext::Raw {
            return self.loader.load(self.record.id).await;
        }

        let mut record = self.record.clone();
        let id = record.id;
        for (field, value) in [
            ("slug", &mut record.slug),
            ("title", &mut record.title),
            ("content", &mut record.content),
            ("excerpt", &mut record.excerpt),
        ] {
            *value = self.loader.sanitizer.sanitize(field, value, id, context);
        }
        record.context = Some(context);
        Ok(Some(ContentEntity::new(self.loader.clone(), record)))
    }

    /// The author resolution strategy bound to this entity.
    pub fn author_provider(&self) -> Arc<dyn AuthorProvider> {
        Arc::clone(&self.loader.authors)
    }

    /// Derive this entity's avatar via the fallback policy: the first
    /// author with a resolvable image, else the first author's name,
    /// else blank.
    pub async fn resolve_avatar(&self) -> Result<Box<dyn Avatar>, StoreError> {
        let authors = self.loader.authors.authors_for(self).await?;
        resolve_avatar(&authors, Arc::clone(&self.loader.images)).await
    }

    /// Flatten static and derived attributes for template consumption.
    pub async fn to_map(
        &mut self,
    ) -> Result<serde_json::Map<String, serde_json::Value>, StoreError> {
        let mut map = match serde_json::to_value(&self.record) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        for key in ["ancestors", "category_ids", "template"] {
            let value = self.attribute(key).await?;
            map.insert(key.to_string(), value.into());
        }
        Ok(map)
    }

    /// Parent-chain id walk through the loader, so intermediate records
    /// land in the shared cache. Stops on a missing parent, a repeated
    /// id, or the starting id.
    async fn walk_ancestors(&self) -> Result<Vec<i64>, StoreError> {
        let mut chain = Vec::new();
        let mut current = self.record.parent_id;

        while current > 0 && current != self.record.id && !chain.contains(&current) {
            let Some(parent) = self.loader.snapshot(current).await? else {
                break;
            };
            chain.push(current);
            current = parent.parent_id;
        }

        Ok(chain)
    }

    /// Memoized metadata fetch. The unsanitized value is cached so the
    /// same instance can serve reads consistently under its context.
    async fn metadata_value(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        if let Some(cached) = self.metadata.get(key) {
            return Ok(cached.clone());
        }
        let fetched = self.loader.store.fetch_metadata(self.record.id, key).await?;
        self.metadata.insert(key.to_string(), fetched.clone());
        Ok(fetched)
    }

    fn apply_context(&self, field: &str, value: String) -> String {
        match self.record.context {
            Some(context) if !context.is_raw() => {
                self.loader
                    .sanitizer
                    .sanitize(field, &value, self.record.id, context)
            }
            _ => value,
        }
    }
}
