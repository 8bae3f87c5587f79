//! Shared domain enumerations aligned with persisted storage enums.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Draft,
    Scheduled,
    Published,
    Archived,
}

impl ContentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Scheduled => "scheduled",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }
}

impl TryFrom<&str> for ContentStatus {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "draft" => Ok(ContentStatus::Draft),
            "scheduled" => Ok(ContentStatus::Scheduled),
            "published" => Ok(ContentStatus::Published),
            "archived" => Ok(ContentStatus::Archived),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Article,
    Page,
    Attachment,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Page => "page",
            ContentKind::Attachment => "attachment",
        }
    }
}

/// Named filtering profile applied to field values before exposure.
///
/// `Raw` is the distinguished bypass value: it tags the canonical cached
/// snapshot and is never passed to the sanitization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SanitizeContext {
    Raw,
    Display,
    Edit,
    Attribute,
}

impl SanitizeContext {
    pub fn as_str(self) -> &'static str {
        match self {
            SanitizeContext::Raw => "raw",
            SanitizeContext::Display => "display",
            SanitizeContext::Edit => "edit",
            SanitizeContext::Attribute => "attribute",
        }
    }

    pub fn is_raw(self) -> bool {
        matches!(self, SanitizeContext::Raw)
    }
}

/// Result of a by-name attribute read on a content entity.
///
/// A closed set replacing the original dynamic getter: static fields and
/// string metadata come back as `Text`, id references as `Int`, and the
/// derived id chains (`ancestors`, `category_ids`) as `IntList`.
/// Unknown metadata keys yield `Text("")` rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Int(i64),
    IntList(Vec<i64>),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_ids(&self) -> Option<&[i64]> {
        match self {
            AttributeValue::IntList(values) => Some(values),
            _ => None,
        }
    }

    /// True for the permissive "nothing there" result of a metadata read.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, AttributeValue::Text(value) if value.is_empty())
    }
}

impl From<AttributeValue> for serde_json::Value {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Text(text) => serde_json::Value::String(text),
            AttributeValue::Int(id) => serde_json::Value::from(id),
            AttributeValue::IntList(ids) => serde_json::Value::from(ids),
        }
    }
}
