//! Ordering strategies selected by [`SortKey`].
//!
//! All strategies are stable: records that compare equal keep their relative
//! input order. Missing timestamps sort as the minimum representable instant
//! and missing salaries as zero.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::criteria::SortKey;
use crate::record::Listing;

/// Returns a newly ordered sequence of borrowed records; the input is left
/// untouched.
///
/// # Examples
///
/// ```
/// use crackit_views::{JobDraft, JobRecord, Listing, SortKey, sort_records};
///
/// let jobs = vec![
///     JobRecord::new(JobDraft { salary: Some(10.0), ..JobDraft::default() }),
///     JobRecord::new(JobDraft { salary: None, ..JobDraft::default() }),
///     JobRecord::new(JobDraft { salary: Some(20.0), ..JobDraft::default() }),
/// ];
///
/// let ordered = sort_records(&jobs, SortKey::Salary);
/// let salaries: Vec<_> = ordered.iter().map(|job| job.salary()).collect();
/// assert_eq!(salaries, [Some(20.0), Some(10.0), None]);
/// ```
#[must_use]
pub fn sort_records<'a, R, I>(records: I, key: SortKey) -> Vec<&'a R>
where
    R: Listing + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut ordered: Vec<&'a R> = records.into_iter().collect();
    sort_in_place(&mut ordered, key);
    ordered
}

/// Reorders a slice of borrowed records in place.
pub(crate) fn sort_in_place<R: Listing>(records: &mut [&R], key: SortKey) {
    records.sort_by(|left, right| compare(*left, *right, key));
}

fn compare<R: Listing>(left: &R, right: &R, key: SortKey) -> Ordering {
    match key {
        SortKey::Newest => created_at(right).cmp(&created_at(left)),
        SortKey::Oldest => created_at(left).cmp(&created_at(right)),
        SortKey::Salary => salary(right).total_cmp(&salary(left)),
    }
}

fn created_at<R: Listing>(record: &R) -> DateTime<Utc> {
    record.created_at().unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn salary<R: Listing>(record: &R) -> f64 {
    // Normalises -0.0 so it ties with a missing salary under `total_cmp`.
    record.salary().map_or(0.0, |value| if value == 0.0 { 0.0 } else { value })
}
