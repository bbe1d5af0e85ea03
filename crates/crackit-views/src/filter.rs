//! Per-record inclusion predicate.
//!
//! Stages run cheapest first and short-circuit: visibility, then category,
//! then text. An absent criterion always passes its stage.

use crate::criteria::{CategoryFilter, ViewCriteria};
use crate::matcher::TextQuery;
use crate::record::Listing;
use crate::viewer::ViewerContext;

/// Inclusion predicate prepared from one set of criteria.
///
/// Build it once per view and reuse it for every record; the query is
/// case-folded up front.
#[derive(Debug, Clone)]
pub struct RecordFilter<'c> {
    query: TextQuery,
    category: &'c CategoryFilter,
    viewer: &'c ViewerContext,
}

impl<'c> RecordFilter<'c> {
    /// Prepare the predicate for `criteria` as seen by `viewer`.
    #[must_use]
    pub fn new(criteria: &'c ViewCriteria, viewer: &'c ViewerContext) -> Self {
        Self {
            query: TextQuery::new(&criteria.query),
            category: &criteria.category,
            viewer,
        }
    }

    /// Returns `true` if `record` passes every stage.
    #[must_use]
    pub fn includes<R: Listing>(&self, record: &R) -> bool {
        self.is_visible(record)
            && self.matches_category(record)
            && self.query.matches(record, R::SEARCH_FIELDS)
    }

    fn is_visible<R: Listing>(&self, record: &R) -> bool {
        !record.is_private() || self.viewer.sees_everything() || self.viewer.owns(record)
    }

    fn matches_category<R: Listing>(&self, record: &R) -> bool {
        record
            .category()
            .is_none_or(|category| self.category.admits(category))
    }
}

/// Returns `true` if `record` should appear in a view built from `criteria`
/// for `viewer`.
///
/// Private records are excluded unless the viewer owns them or is an admin,
/// even when the search text would match. Records of a kind without a
/// category facet are never narrowed by category.
#[must_use]
pub fn include_record<R: Listing>(
    record: &R,
    criteria: &ViewCriteria,
    viewer: &ViewerContext,
) -> bool {
    RecordFilter::new(criteria, viewer).includes(record)
}
