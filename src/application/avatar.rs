//! Avatar variants and the fallback resolution policy.
//!
//! An avatar is a disposable, stateless renderable derived from already
//! resolved author data. `render` never fails: an image whose source
//! cannot be resolved falls back to blank markup instead of propagating
//! an error.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use askama::Template;
use async_trait::async_trait;
use tracing::debug;

use crate::application::authors::Author;
use crate::application::store::{ImageResolver, StoreError};
use crate::domain::entities::ResponsiveImage;

/// Background palette for text avatars. Index is picked by hashing the
/// seed name, so the same name always renders the same color.
const TEXT_PALETTE: [&str; 8] = [
    "#1b5e20", "#4a148c", "#0d47a1", "#b71c1c", "#004d40", "#e65100", "#33691e", "#880e4f",
];

/// A renderable visual identity for one or more authors.
#[async_trait]
pub trait Avatar: Send + Sync {
    /// Produce presentation markup at the requested size. Never fails.
    async fn render(&self, width: u32, height: u32) -> String;

    /// Attachment backing the avatar, for image-backed variants.
    fn attachment_id(&self) -> Option<i64> {
        None
    }
}

#[derive(Template)]
#[template(
    source = r#"<img alt="" width="{{ width }}" height="{{ height }}" style="border-radius:50%" src="{{ src }}"{% match responsive %}{% when Some(r) %} srcset="{{ r.srcset }}" sizes="{{ r.sizes }}"{% when None %}{% endmatch %}>"#,
    ext = "html"
)]
struct ImageMarkup {
    width: u32,
    height: u32,
    src: String,
    responsive: Option<ResponsiveImage>,
}

#[derive(Template)]
#[template(
    source = r#"<span role="img" aria-label="{{ name }}" style="display:inline-block;overflow:hidden;text-align:center;vertical-align:middle;border-radius:50%;width:{{ width }}px;height:{{ height }}px;line-height:{{ height }}px;font-size:{{ font_size }}px;color:#fff;background:{{ color }}">{{ initial }}</span>"#,
    ext = "html"
)]
struct TextMarkup {
    width: u32,
    height: u32,
    font_size: u32,
    color: &'static str,
    name: String,
    initial: char,
}

fn blank_markup(width: u32, height: u32) -> String {
    format!(
        r#"<span aria-hidden="true" style="display:inline-block;width:{width}px;height:{height}px;border-radius:50%;background:#e0e0e0"></span>"#
    )
}

/// Avatar rendered when no author identity is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankAvatar;

#[async_trait]
impl Avatar for BlankAvatar {
    async fn render(&self, width: u32, height: u32) -> String {
        blank_markup(width, height)
    }
}

/// Avatar rendered from the initial of a display name.
#[derive(Debug, Clone)]
pub struct TextAvatar {
    name: String,
}

impl TextAvatar {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn seed(&self) -> &str {
        &self.name
    }

    fn color(&self) -> &'static str {
        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        TEXT_PALETTE[(hasher.finish() % TEXT_PALETTE.len() as u64) as usize]
    }
}

#[async_trait]
impl Avatar for TextAvatar {
    async fn render(&self, width: u32, height: u32) -> String {
        let Some(initial) = self.name.trim().chars().next() else {
            return blank_markup(width, height);
        };

        let markup = TextMarkup {
            width,
            height,
            font_size: (height / 2).max(1),
            color: self.color(),
            name: self.name.clone(),
            initial: initial.to_uppercase().next().unwrap_or(initial),
        };
        markup
            .render()
            .unwrap_or_else(|_| blank_markup(width, height))
    }
}

/// Avatar backed by an image attachment.
pub struct ImageAvatar {
    attachment_id: i64,
    images: Arc<dyn ImageResolver>,
}

impl ImageAvatar {
    pub fn new(attachment_id: i64, images: Arc<dyn ImageResolver>) -> Self {
        Self {
            attachment_id,
            images,
        }
    }
}

#[async_trait]
impl Avatar for ImageAvatar {
    async fn render(&self, width: u32, height: u32) -> String {
        let Some(source) = self
            .images
            .resolve_source(self.attachment_id, width, height)
            .await
        else {
            // The attachment no longer resolves to pixel data.
            debug!(
                attachment_id = self.attachment_id,
                "avatar image source unresolvable; rendering blank"
            );
            return blank_markup(width, height);
        };

        let responsive = self
            .images
            .responsive_metadata(self.attachment_id, &source)
            .await;

        let markup = ImageMarkup {
            width,
            height,
            src: source.url,
            responsive,
        };
        markup
            .render()
            .unwrap_or_else(|_| blank_markup(width, height))
    }

    fn attachment_id(&self) -> Option<i64> {
        Some(self.attachment_id)
    }
}

/// Derive exactly one avatar from an ordered author list.
///
/// Empty list → blank. Otherwise the first author whose profile image
/// resolves backs an image avatar; with no images at all, a text avatar
/// is seeded from the first author's name. Deterministic for a given
/// ordered list.
pub async fn resolve_avatar(
    authors: &[Arc<dyn Author>],
    images: Arc<dyn ImageResolver>,
) -> Result<Box<dyn Avatar>, StoreError> {
    if authors.is_empty() {
        return Ok(Box::new(BlankAvatar));
    }

    for author in authors {
        if let Some(attachment) = author.image().await? {
            return Ok(Box::new(ImageAvatar::new(attachment.id, images)));
        }
    }

    Ok(Box::new(TextAvatar::new(authors[0].name())))
}
