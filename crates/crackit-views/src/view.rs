//! Derived view composition: scope, filter, sort, then truncate.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::criteria::ViewCriteria;
use crate::filter::RecordFilter;
use crate::record::Listing;
use crate::scope::scope;
use crate::sort::sort_in_place;
use crate::viewer::ViewerContext;

/// The ordered, filtered, possibly truncated list a page renders.
///
/// ## Invariants
/// - `items.len() <= filtered_count <= total_count`.
/// - `items` is ordered by the criteria's sort key alone; ties keep input
///   order.
/// - Every record in `items` passes [`include_record`](crate::include_record)
///   and is in the viewer's scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView<'a, R> {
    /// Records to render, borrowed from the source collection.
    pub items: Vec<&'a R>,
    /// Records the viewer is entitled to see before search and category
    /// narrowing.
    pub total_count: usize,
    /// Records that passed every filter stage, before truncation.
    pub filtered_count: usize,
    /// Number of in-scope records per category value, for filter chips.
    /// Empty for kinds without a category facet.
    pub category_counts: BTreeMap<String, usize>,
}

impl<R> DerivedView<'_, R> {
    /// Returns `true` when the view was cut short by a limit.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.items.len() < self.filtered_count
    }
}

/// Compose the derived view of `records` for `viewer` under `criteria`.
///
/// Total for every input: an empty collection yields an empty view, and the
/// source collection is only borrowed, never reordered.
///
/// # Examples
///
/// ```
/// use crackit_views::{JobDraft, JobRecord, RecordId, SortKey, ViewCriteria, ViewerContext, compose_view};
///
/// let jobs: Vec<JobRecord> = ["Backend Engineer", "Frontend Engineer", "Designer"]
///     .into_iter()
///     .enumerate()
///     .map(|(index, title)| JobRecord::new(JobDraft {
///         id: RecordId::new(index.to_string()),
///         title: title.to_owned(),
///         ..JobDraft::default()
///     }))
///     .collect();
///
/// let criteria = ViewCriteria::default().with_query("engineer").with_limit(1);
/// let view = compose_view(&jobs, &criteria, &ViewerContext::guest());
///
/// assert_eq!(view.total_count, 3);
/// assert_eq!(view.filtered_count, 2);
/// assert_eq!(view.items.len(), 1);
/// ```
#[must_use]
pub fn compose_view<'a, R: Listing>(
    records: &'a [R],
    criteria: &ViewCriteria,
    viewer: &ViewerContext,
) -> DerivedView<'a, R> {
    let scoped = scope(records, viewer);
    let category_counts = count_categories(&scoped);

    let filter = RecordFilter::new(criteria, viewer);
    let mut items: Vec<&'a R> = scoped
        .iter()
        .copied()
        .filter(|record| filter.includes(*record))
        .collect();
    sort_in_place(&mut items, criteria.sort_key);

    let filtered_count = items.len();
    if let Some(limit) = criteria.limit {
        items.truncate(limit);
    }

    debug!(
        kind = %R::KIND,
        role = %viewer.role(),
        mode = %viewer.mode(),
        sort_key = %criteria.sort_key,
        total_count = scoped.len(),
        filtered_count,
        shown = items.len(),
        "derived view composed"
    );

    DerivedView {
        items,
        total_count: scoped.len(),
        filtered_count,
        category_counts,
    }
}

fn count_categories<R: Listing>(records: &[&R]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for category in records.iter().filter_map(|record| record.category()) {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            continue;
        }
        *counts.entry(trimmed.to_owned()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    //! Composition order, counts, and truncation.

    use chrono::TimeZone;
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::criteria::SortKey;
    use crate::record::{
        JobDraft, JobRecord, NewsletterDraft, NewsletterRecord, OwnerRef, RecordId,
    };
    use crate::viewer::{Role, ScopeMode};

    fn job(id: &str, job_type: &str, day: u32, owner: &str) -> JobRecord {
        JobRecord::new(JobDraft {
            id: RecordId::new(id),
            title: format!("{job_type} role {id}"),
            job_type: job_type.to_owned(),
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).single(),
            created_by: Some(OwnerRef::new(owner, "Recruiter")),
            ..JobDraft::default()
        })
    }

    fn board() -> Vec<JobRecord> {
        vec![
            job("1", "Full-time", 1, "r1"),
            job("2", "Internship", 2, "r2"),
            job("3", "Full-time", 3, "r1"),
            job("4", " ", 4, "r2"),
        ]
    }

    fn ids<R: Listing>(view: &DerivedView<'_, R>) -> Vec<String> {
        view.items
            .iter()
            .map(|record| record.id().as_str().to_owned())
            .collect()
    }

    #[test]
    fn category_counts_cover_scope_not_filter() {
        let records = board();
        let criteria = ViewCriteria::default().with_category("Internship");
        let view = compose_view(&records, &criteria, &ViewerContext::guest());

        assert_eq!(ids(&view), ["2"]);
        assert_eq!(view.total_count, 4);
        assert_eq!(view.filtered_count, 1);
        assert_eq!(
            view.category_counts,
            BTreeMap::from([("Full-time".to_owned(), 2), ("Internship".to_owned(), 1)])
        );
    }

    #[test]
    fn recruiter_dashboard_counts_only_own_jobs() {
        let records = board();
        let viewer = ViewerContext::signed_in("r1", Role::Recruiter).with_mode(ScopeMode::OwnOnly);
        let view = compose_view(&records, &ViewCriteria::default(), &viewer);

        assert_eq!(ids(&view), ["3", "1"]);
        assert_eq!(view.total_count, 2);
        assert_eq!(view.category_counts.get("Full-time"), Some(&2));
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let records = board();
        let criteria = ViewCriteria::default()
            .with_sort_key(SortKey::Oldest)
            .with_limit(2);
        let view = compose_view(&records, &criteria, &ViewerContext::guest());

        assert_eq!(ids(&view), ["1", "2"]);
        assert_eq!(view.filtered_count, 4);
        assert!(view.is_truncated());
    }

    #[test]
    fn zero_limit_yields_no_items() {
        let records = board();
        let view = compose_view(
            &records,
            &ViewCriteria::default().with_limit(0),
            &ViewerContext::guest(),
        );
        assert!(view.items.is_empty());
        assert_eq!(view.filtered_count, 4);
    }

    #[test]
    fn newsletters_have_no_category_counts() {
        let records = vec![NewsletterRecord::new(NewsletterDraft::default())];
        let view = compose_view(&records, &ViewCriteria::default(), &ViewerContext::guest());
        assert!(view.category_counts.is_empty());
        assert_eq!(view.total_count, 1);
    }

    #[test]
    fn view_serialises_with_wire_names() {
        let records: Vec<JobRecord> = Vec::new();
        let view = compose_view(&records, &ViewCriteria::default(), &ViewerContext::guest());
        let value = serde_json::to_value(&view).expect("view serialises");
        assert_eq!(
            value,
            json!({ "items": [], "totalCount": 0, "filteredCount": 0, "categoryCounts": {} })
        );
    }
}
