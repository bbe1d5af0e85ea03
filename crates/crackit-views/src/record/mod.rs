//! Record snapshots received from the CrackIt backend.
//!
//! Purpose: model job postings and newsletter articles as immutable
//! snapshots. The derivation stages only ever borrow these values; they are
//! created by decoding backend JSON and discarded on the next fetch.
//!
//! Decoding is lenient. A missing or malformed field degrades to a default
//! (empty text, absent salary, absent timestamp) instead of rejecting the
//! record, so a single odd payload never blanks a whole listing.
//!
//! Public surface:
//! - [`Listing`]: the capabilities every derivation stage relies on.
//! - [`JobRecord`] and [`NewsletterRecord`]: the two record kinds.
//! - [`RecordId`] and [`EntityRef`]: identifiers and references.

mod job;
pub(crate) mod lenient;
mod newsletter;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use job::{ApplicationRef, JobDraft, JobField, JobRecord};
pub use newsletter::{NewsletterDraft, NewsletterField, NewsletterRecord};

/// Opaque identifier assigned by the backend.
///
/// Accepts JSON strings and numbers; numbers keep their decimal text form so
/// `1` and `"1"` identify the same record. `null` decodes to the empty
/// identifier, which never matches anything during ownership checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Construct an identifier from its text form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns `true` when the backend supplied no usable identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// Reference to an externally owned entity such as a company or a user.
///
/// The backend sends either a populated object (`{"_id": "...", "name":
/// "..."}`) or a bare identifier when the relation was not expanded. Both
/// decode into this shape; the name is empty in the latter case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct EntityRef {
    id: RecordId,
    name: String,
}

impl EntityRef {
    /// Construct a reference from an identifier and a display name.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Identifier of the referenced entity.
    #[must_use]
    pub const fn id(&self) -> &RecordId {
        &self.id
    }

    /// Display name of the referenced entity, empty when unknown.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Company a job posting belongs to.
pub type CompanyRef = EntityRef;

/// User that authored or owns a record.
pub type OwnerRef = EntityRef;

/// Record kinds flowing through the derivation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Job postings.
    Job,
    /// Newsletter articles.
    Newsletter,
}

impl RecordKind {
    /// Key the backend uses for this kind's collection inside a response
    /// envelope.
    #[must_use]
    pub const fn collection_key(self) -> &'static str {
        match self {
            Self::Job => "jobs",
            Self::Newsletter => "newsletters",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Job => f.write_str("job"),
            Self::Newsletter => f.write_str("newsletter"),
        }
    }
}

/// Capabilities the scope, filter, and sort stages need from a record.
///
/// Every accessor is total: absent data is reported as `None` or an empty
/// string and the stages apply the documented defaults.
pub trait Listing {
    /// Selector for the text fields the matcher can search.
    type Field: Copy + fmt::Debug + 'static;

    /// Which kind of record this is; drives the scope policy table.
    const KIND: RecordKind;

    /// Fields searched when a view is composed.
    const SEARCH_FIELDS: &'static [Self::Field];

    /// Backend identifier.
    fn id(&self) -> &RecordId;

    /// Text of one searchable field; empty when the backend omitted it.
    fn field_text(&self, field: Self::Field) -> &str;

    /// Identifier of the owning user, if the backend supplied a usable one.
    fn owner_id(&self) -> Option<&RecordId>;

    /// Whether only the owner and admins may observe this record.
    fn is_private(&self) -> bool;

    /// Category facet value. `None` means the kind has no category facet;
    /// `Some("")` means the facet exists but this record left it blank.
    fn category(&self) -> Option<&str>;

    /// Creation timestamp, if one could be decoded.
    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Salary magnitude, if the kind carries one and it was supplied.
    fn salary(&self) -> Option<f64>;
}

fn usable_owner(owner: &OwnerRef) -> Option<&RecordId> {
    let id = owner.id();
    (!id.is_empty()).then_some(id)
}
