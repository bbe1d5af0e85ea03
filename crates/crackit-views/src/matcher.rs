//! Case-insensitive substring matching over selected record fields.
//!
//! Matching is plain substring containment after lower-casing both sides.
//! There is no tokenisation and no fuzzy matching.

use crate::record::Listing;

/// A search query prepared for repeated matching.
///
/// Lower-cases the query once so composing a view over many records does not
/// repeat the work per record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    /// Prepare `query` for matching. The query is used verbatim apart from
    /// case folding; surrounding whitespace is significant.
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// Returns `true` when the query is empty and therefore matches
    /// everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns `true` if the query occurs in at least one of `fields`.
    #[must_use]
    pub fn matches<R: Listing>(&self, record: &R, fields: &[R::Field]) -> bool {
        if self.is_empty() {
            return true;
        }
        fields
            .iter()
            .any(|field| contains_folded(record.field_text(*field), &self.needle))
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Returns `true` if `query` is empty or is a case-insensitive substring of at
/// least one of the named `fields` of `record`.
///
/// Absent fields read as empty text, so they only match an empty query.
///
/// # Examples
///
/// ```
/// use crackit_views::{JobDraft, JobField, JobRecord, matches};
///
/// let job = JobRecord::new(JobDraft {
///     title: "Backend Engineer".to_owned(),
///     ..JobDraft::default()
/// });
///
/// assert!(matches(&job, "ENGINEER", &[JobField::Title]));
/// assert!(!matches(&job, "engineer", &[JobField::Location]));
/// assert!(matches(&job, "", &[]));
/// ```
#[must_use]
pub fn matches<R: Listing>(record: &R, query: &str, fields: &[R::Field]) -> bool {
    TextQuery::new(query).matches(record, fields)
}
