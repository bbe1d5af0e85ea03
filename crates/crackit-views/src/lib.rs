//! Derived list views for the CrackIt job board.
//!
//! Given a snapshot of job postings or newsletter articles, the criteria a
//! page has selected, and the identity of the viewer, this crate produces the
//! ordered, filtered, possibly truncated list that page renders. Every
//! derivation stage is a pure, total function: nothing is fetched, nothing is
//! mutated, and malformed fields degrade to documented defaults.
//!
//! # Overview
//!
//! The pipeline composed by [`compose_view`] runs:
//!
//! - [`scope`]: the records the viewer's role entitles them to see
//! - [`include_record`]: privacy, category, and text narrowing
//! - [`sort_records`]: a stable ordering by one [`SortKey`]
//! - truncation to the criteria's optional limit
//!
//! [`decode_collection`] and [`load_collection`] turn backend JSON into
//! records for callers that hold raw responses.
//!
//! # Example
//!
//! ```
//! use crackit_views::{
//!     JobRecord, Role, SortKey, ViewCriteria, ViewerContext, compose_view, decode_collection,
//! };
//!
//! let json = r#"[
//!     {"_id": "1", "title": "Backend Engineer", "createdAt": "2024-01-01", "salary": 10},
//!     {"_id": "2", "title": "Frontend Engineer", "createdAt": "2024-02-01", "salary": 20}
//! ]"#;
//! let jobs: Vec<JobRecord> = decode_collection(json).expect("valid snapshot");
//!
//! let criteria = ViewCriteria::default()
//!     .with_query("engineer")
//!     .with_sort_key(SortKey::Newest);
//! let viewer = ViewerContext::signed_in("u1", Role::Student);
//! let view = compose_view(&jobs, &criteria, &viewer);
//!
//! let titles: Vec<&str> = view.items.iter().map(|job| job.title()).collect();
//! assert_eq!(titles, ["Frontend Engineer", "Backend Engineer"]);
//! assert_eq!(view.filtered_count, 2);
//! assert_eq!(view.total_count, 2);
//! ```

pub mod cli;
mod criteria;
mod error;
mod filter;
mod matcher;
mod record;
mod scope;
mod settings;
mod snapshot;
mod sort;
mod view;
mod viewer;

pub use criteria::{CategoryFilter, SortKey, ViewCriteria};
pub use error::{CliError, SnapshotError};
pub use filter::{RecordFilter, include_record};
pub use matcher::{TextQuery, matches};
pub use record::{
    ApplicationRef, CompanyRef, EntityRef, JobDraft, JobField, JobRecord, Listing,
    NewsletterDraft, NewsletterField, NewsletterRecord, OwnerRef, RecordId, RecordKind,
};
pub use scope::{Visibility, is_in_scope, scope};
pub use settings::ViewSettings;
pub use snapshot::{decode_collection, load_collection};
pub use sort::sort_records;
pub use view::{DerivedView, compose_view};
pub use viewer::{Role, ScopeMode, ViewerContext};
