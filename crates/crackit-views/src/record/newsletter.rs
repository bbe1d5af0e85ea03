//! Newsletter article snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::lenient::{self, Fields};
use super::{Listing, OwnerRef, RecordId, RecordKind, usable_owner};

/// Searchable text fields of a [`NewsletterRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsletterField {
    /// Article title.
    Title,
    /// Article body.
    Content,
    /// Display name of the author.
    AuthorName,
}

/// Input payload for [`NewsletterRecord::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsletterDraft {
    /// Backend identifier.
    pub id: RecordId,
    /// Article title.
    pub title: String,
    /// Article body.
    pub content: String,
    /// Author and owner of the article.
    pub created_by: OwnerRef,
    /// Whether only the author and admins may read the article.
    pub is_private: bool,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

/// Newsletter article as received from the backend.
///
/// ## Invariants
/// - A private article must never reach a viewer other than its author or an
///   admin. The scope and filter stages both enforce this; the record itself
///   only reports the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterRecord {
    id: RecordId,
    title: String,
    content: String,
    created_by: OwnerRef,
    is_private: bool,
    created_at: Option<DateTime<Utc>>,
}

/// Decodes leniently: `_id` wins over `id`, camelCase keys win over their
/// snake_case spellings, and malformed fields fall back to defaults.
impl<'de> Deserialize<'de> for NewsletterRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Fields::deserialize(deserializer)?;
        Ok(Self {
            id: RecordId::from(fields.take(&lenient::ID_KEYS)),
            title: lenient::text(fields.take(&["title"])),
            content: lenient::text(fields.take(&["content"])),
            created_by: OwnerRef::from(fields.take(&["createdBy", "created_by"])),
            is_private: lenient::flag(&fields.take(&["isPrivate", "is_private"])),
            created_at: lenient::timestamp(&fields.take(&["createdAt", "created_at"])),
        })
    }
}

impl NewsletterRecord {
    /// Construct a snapshot from a draft.
    #[must_use]
    pub fn new(draft: NewsletterDraft) -> Self {
        Self::from(draft)
    }

    /// Article title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Article body.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Author and owner of the article.
    #[must_use]
    pub const fn created_by(&self) -> &OwnerRef {
        &self.created_by
    }
}

impl From<NewsletterDraft> for NewsletterRecord {
    fn from(draft: NewsletterDraft) -> Self {
        Self {
            id: draft.id,
            title: draft.title,
            content: draft.content,
            created_by: draft.created_by,
            is_private: draft.is_private,
            created_at: draft.created_at,
        }
    }
}

impl Listing for NewsletterRecord {
    type Field = NewsletterField;

    const KIND: RecordKind = RecordKind::Newsletter;

    const SEARCH_FIELDS: &'static [NewsletterField] =
        &[NewsletterField::Title, NewsletterField::Content];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field_text(&self, field: NewsletterField) -> &str {
        match field {
            NewsletterField::Title => self.title(),
            NewsletterField::Content => self.content(),
            NewsletterField::AuthorName => self.created_by.name(),
        }
    }

    fn owner_id(&self) -> Option<&RecordId> {
        usable_owner(&self.created_by)
    }

    fn is_private(&self) -> bool {
        self.is_private
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn salary(&self) -> Option<f64> {
        None
    }
}
