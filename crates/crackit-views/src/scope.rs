//! Role-based scoping: which records a viewer is entitled to see at all.
//!
//! The whole policy is one table keyed by record kind, role, and mode:
//!
//! | Viewer role | Job records                        | Newsletter records |
//! |-------------|------------------------------------|--------------------|
//! | guest       | all                                | public only        |
//! | student     | all                                | public + own       |
//! | recruiter   | all; own only in `OwnOnly` mode    | public + own       |
//! | admin       | all                                | all                |
//!
//! Guests have no identity, so "public + own" collapses to "public only" for
//! them.

use crate::record::{Listing, RecordKind};
use crate::viewer::{Role, ScopeMode, ViewerContext};

/// Visibility rule selected from the policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Every record, private or not.
    Everything,
    /// Public records plus private records the viewer owns.
    PublicOrOwned,
    /// Only records the viewer owns.
    OwnedOnly,
}

impl Visibility {
    /// Look up the rule for a record kind and viewer.
    #[must_use]
    pub const fn for_viewer(kind: RecordKind, role: Role, mode: ScopeMode) -> Self {
        match (kind, role, mode) {
            (RecordKind::Job, Role::Recruiter, ScopeMode::OwnOnly) => Self::OwnedOnly,
            (RecordKind::Job, _, _) | (RecordKind::Newsletter, Role::Admin, _) => Self::Everything,
            (RecordKind::Newsletter, _, _) => Self::PublicOrOwned,
        }
    }

    /// Returns `true` if `record` is visible to `viewer` under this rule.
    #[must_use]
    pub fn admits<R: Listing>(self, record: &R, viewer: &ViewerContext) -> bool {
        match self {
            Self::Everything => true,
            Self::PublicOrOwned => !record.is_private() || viewer.owns(record),
            Self::OwnedOnly => viewer.owns(record),
        }
    }
}

/// Returns `true` if `viewer` is entitled to see `record` before any search or
/// category narrowing.
#[must_use]
pub fn is_in_scope<R: Listing>(record: &R, viewer: &ViewerContext) -> bool {
    Visibility::for_viewer(R::KIND, viewer.role(), viewer.mode()).admits(record, viewer)
}

/// Returns the records `viewer` is entitled to see, in their original order.
///
/// # Examples
///
/// ```
/// use crackit_views::{NewsletterDraft, NewsletterRecord, OwnerRef, Role, ViewerContext, scope};
///
/// let private_note = NewsletterRecord::new(NewsletterDraft {
///     created_by: OwnerRef::new("u1", "Ada"),
///     is_private: true,
///     ..NewsletterDraft::default()
/// });
/// let records = vec![private_note];
///
/// assert!(scope(&records, &ViewerContext::signed_in("u2", Role::Student)).is_empty());
/// assert_eq!(scope(&records, &ViewerContext::signed_in("u1", Role::Student)).len(), 1);
/// assert_eq!(scope(&records, &ViewerContext::signed_in("u9", Role::Admin)).len(), 1);
/// ```
#[must_use]
pub fn scope<'a, R: Listing>(records: &'a [R], viewer: &ViewerContext) -> Vec<&'a R> {
    let visibility = Visibility::for_viewer(R::KIND, viewer.role(), viewer.mode());
    records
        .iter()
        .filter(|record| visibility.admits(*record, viewer))
        .collect()
}
