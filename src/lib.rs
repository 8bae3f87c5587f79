//! Masthead
//!
//! Author attribution and avatar identity core for a publishing engine.
//!
//! The crate is organized in three layers:
//!
//! - **domain**: value records mirrored from persistent storage
//!   (`ContentRecord`, `TermRecord`) and shared enumerations.
//! - **application**: the content entity model (`EntityLoader`,
//!   `ContentEntity`), author resolution (`AuthorProvider`, `Author`),
//!   the avatar fallback policy, and the collaborator seams storage,
//!   sanitization, image resolution and URL building plug into.
//! - **cache**: the shared raw-snapshot cache backing entity loads.
//!
//! All storage access goes through the [`application::store::ContentStore`]
//! collaborator; the crate itself never persists anything and only
//! invalidates caches it owns. Template-facing paths degrade gracefully:
//! missing records, images, and metadata surface as absent values, never
//! as rendering failures.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;

pub use application::authors::{Author, AuthorProvider, TaxonomyAuthor, TaxonomyAuthorProvider};
pub use application::avatar::{Avatar, BlankAvatar, ImageAvatar, TextAvatar, resolve_avatar};
pub use application::entity::{ContentEntity, EntityLoader};
pub use application::store::{
    ArchiveUrlBuilder, ContentStore, ImageResolver, PassthroughSanitizer, Sanitizer, StoreError,
};
pub use cache::{CacheConfig, EntityStore};
pub use domain::entities::{ContentRecord, ImageSource, ResponsiveImage, TermRecord};
pub use domain::types::{AttributeValue, ContentKind, ContentStatus, SanitizeContext};
