//! In-memory collaborator fakes shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;

use masthead::{
    ArchiveUrlBuilder, CacheConfig, ContentKind, ContentRecord, ContentStatus, ContentStore,
    EntityLoader, EntityStore, ImageResolver, ImageSource, ResponsiveImage, SanitizeContext,
    Sanitizer, StoreError, TermRecord,
};

/// Storage fake over plain maps. Fetch counters make cache behavior
/// observable.
#[derive(Default)]
pub struct FakeStore {
    contents: Mutex<HashMap<i64, ContentRecord>>,
    terms: Mutex<HashMap<i64, TermRecord>>,
    metadata: Mutex<HashMap<(i64, String), String>>,
    relations: Mutex<HashMap<(i64, String), Vec<i64>>>,
    pub content_fetches: AtomicUsize,
    pub metadata_fetches: AtomicUsize,
}

impl FakeStore {
    pub fn upsert_content(&self, record: ContentRecord) {
        self.contents.lock().unwrap().insert(record.id, record);
    }

    pub fn upsert_term(&self, term: TermRecord) {
        self.terms.lock().unwrap().insert(term.id, term);
    }

    pub fn set_metadata(&self, owner_id: i64, key: &str, value: &str) {
        self.metadata
            .lock()
            .unwrap()
            .insert((owner_id, key.to_string()), value.to_string());
    }

    /// Attach terms to a content item in the given order.
    pub fn attach_terms(&self, content_id: i64, taxonomy: &str, term_ids: &[i64]) {
        self.relations
            .lock()
            .unwrap()
            .insert((content_id, taxonomy.to_string()), term_ids.to_vec());
    }
}

#[async_trait]
impl ContentStore for FakeStore {
    async fn fetch_content(&self, id: i64) -> Result<Option<ContentRecord>, StoreError> {
        self.content_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.contents.lock().unwrap().get(&id).cloned())
    }

    async fn fetch_term(&self, id: i64) -> Result<Option<TermRecord>, StoreError> {
        Ok(self.terms.lock().unwrap().get(&id).cloned())
    }

    async fn fetch_metadata(
        &self,
        owner_id: i64,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        self.metadata_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .metadata
            .lock()
            .unwrap()
            .get(&(owner_id, key.to_string()))
            .cloned())
    }

    async fn terms_for(
        &self,
        content_id: i64,
        taxonomy: &str,
    ) -> Result<Vec<TermRecord>, StoreError> {
        let ids = self
            .relations
            .lock()
            .unwrap()
            .get(&(content_id, taxonomy.to_string()))
            .cloned()
            .unwrap_or_default();
        let terms = self.terms.lock().unwrap();
        Ok(ids.iter().filter_map(|id| terms.get(id).cloned()).collect())
    }
}

/// Sanitizer that tags values with the active context so tests can see
/// exactly which pipeline a value went through.
pub struct MarkingSanitizer;

impl Sanitizer for MarkingSanitizer {
    fn sanitize(
        &self,
        _field: &str,
        value: &str,
        _owner_id: i64,
        context: SanitizeContext,
    ) -> String {
        format!("[{}]{}", context.as_str(), value)
    }
}

#[derive(Default)]
pub struct FakeImages {
    sources: Mutex<HashMap<i64, ImageSource>>,
    responsive: Mutex<HashMap<i64, ResponsiveImage>>,
}

impl FakeImages {
    pub fn set_source(&self, attachment_id: i64, url: &str) {
        self.sources.lock().unwrap().insert(
            attachment_id,
            ImageSource {
                url: url.to_string(),
                width: 0,
                height: 0,
            },
        );
    }

    pub fn set_responsive(&self, attachment_id: i64, srcset: &str, sizes: &str) {
        self.responsive.lock().unwrap().insert(
            attachment_id,
            ResponsiveImage {
                srcset: srcset.to_string(),
                sizes: sizes.to_string(),
            },
        );
    }
}

#[async_trait]
impl ImageResolver for FakeImages {
    async fn resolve_source(
        &self,
        attachment_id: i64,
        width: u32,
        height: u32,
    ) -> Option<ImageSource> {
        self.sources
            .lock()
            .unwrap()
            .get(&attachment_id)
            .map(|source| ImageSource {
                url: source.url.clone(),
                width,
                height,
            })
    }

    async fn responsive_metadata(
        &self,
        attachment_id: i64,
        _source: &ImageSource,
    ) -> Option<ResponsiveImage> {
        self.responsive.lock().unwrap().get(&attachment_id).cloned()
    }
}

pub struct FakeUrls;

impl ArchiveUrlBuilder for FakeUrls {
    fn archive_url(&self, _term_id: i64, slug: &str) -> String {
        format!("/authors/{slug}")
    }
}

pub fn record(id: i64, title: &str) -> ContentRecord {
    ContentRecord {
        id,
        author_id: 0,
        parent_id: 0,
        status: ContentStatus::Published,
        kind: ContentKind::Article,
        slug: format!("item-{id}"),
        title: title.to_string(),
        content: String::new(),
        excerpt: String::new(),
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
        context: None,
    }
}

pub fn attachment(id: i64) -> ContentRecord {
    let mut record = record(id, "attachment");
    record.kind = ContentKind::Attachment;
    record
}

pub fn term(id: i64, taxonomy: &str, name: &str) -> TermRecord {
    TermRecord {
        id,
        taxonomy: taxonomy.to_string(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: format!("<p>{name}</p>"),
        count: 0,
    }
}

pub struct Harness {
    pub store: Arc<FakeStore>,
    pub images: Arc<FakeImages>,
    pub loader: EntityLoader,
}

pub fn harness() -> Harness {
    let store = Arc::new(FakeStore::default());
    let images = Arc::new(FakeImages::default());
    let cache = Arc::new(EntityStore::new(&CacheConfig::default()));

    let loader = EntityLoader::new(
        Arc::clone(&store) as Arc<dyn ContentStore>,
        Arc::new(MarkingSanitizer),
        Arc::clone(&images) as Arc<dyn ImageResolver>,
        Arc::new(FakeUrls),
        cache,
    );

    Harness {
        store,
        images,
        loader,
    }
}
