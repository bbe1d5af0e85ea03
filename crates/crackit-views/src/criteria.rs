//! User-selected filter and sort configuration for a view.
//!
//! Every criterion has a neutral default and parsing never fails: an
//! unrecognised sort key behaves as [`SortKey::Newest`] and a blank or `all`
//! category disables category narrowing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::record::lenient::{self, Fields};

/// Order applied to the filtered records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub enum SortKey {
    /// Most recently created first.
    #[default]
    Newest,
    /// Least recently created first.
    Oldest,
    /// Highest salary first; missing salaries count as zero.
    Salary,
}

impl SortKey {
    /// Parse a sort key, falling back to [`SortKey::Newest`] for anything
    /// unrecognised.
    ///
    /// # Examples
    ///
    /// ```
    /// use crackit_views::SortKey;
    ///
    /// assert_eq!(SortKey::parse("salary"), SortKey::Salary);
    /// assert_eq!(SortKey::parse(" Oldest "), SortKey::Oldest);
    /// assert_eq!(SortKey::parse("bogus"), SortKey::Newest);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "oldest" => Self::Oldest,
            "salary" => Self::Salary,
            _ => Self::Newest,
        }
    }

    /// Wire name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Salary => "salary",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Value> for SortKey {
    fn from(value: Value) -> Self {
        Self::parse(&lenient::text(value))
    }
}

impl From<SortKey> for String {
    fn from(value: SortKey) -> Self {
        value.as_str().to_owned()
    }
}

/// Category (job type) narrowing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub enum CategoryFilter {
    /// No narrowing.
    #[default]
    All,
    /// Keep only records whose category equals this value, ignoring ASCII
    /// case.
    Only(String),
}

impl CategoryFilter {
    /// Wire value meaning "no narrowing".
    pub const ALL: &'static str = "all";

    /// Parse a category selection; blank input and `all` (any case) disable
    /// narrowing.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ALL) {
            Self::All
        } else {
            Self::Only(trimmed.to_owned())
        }
    }

    /// Returns `true` if a record with `category` passes this filter.
    #[must_use]
    pub fn admits(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted.eq_ignore_ascii_case(category.trim()),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Value> for CategoryFilter {
    fn from(value: Value) -> Self {
        Self::parse(&lenient::text(value))
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => CategoryFilter::ALL.to_owned(),
            CategoryFilter::Only(category) => category,
        }
    }
}

/// Filter and sort configuration for one view.
///
/// Deserializes from the camelCase object the UI keeps in its store; every
/// field is optional, `null` reads as absent, and `jobType`/`sortBy` are
/// accepted for `category`/`sortKey`.
///
/// # Examples
///
/// ```
/// use crackit_views::{CategoryFilter, SortKey, ViewCriteria};
///
/// let criteria = ViewCriteria::default()
///     .with_query("engineer")
///     .with_sort_key(SortKey::Salary)
///     .with_limit(3);
///
/// assert_eq!(criteria.category, CategoryFilter::All);
/// assert_eq!(criteria.limit, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCriteria {
    /// Free-text search query; empty matches everything.
    pub query: String,
    /// Category narrowing.
    pub category: CategoryFilter,
    /// Ordering of the result.
    pub sort_key: SortKey,
    /// Maximum number of items to return; `None` disables truncation.
    pub limit: Option<usize>,
}

impl<'de> Deserialize<'de> for ViewCriteria {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Fields::deserialize(deserializer)?;
        Ok(Self {
            query: lenient::text(fields.take(&["query"])),
            category: CategoryFilter::from(fields.take(&["category", "jobType"])),
            sort_key: SortKey::from(fields.take(&["sortKey", "sortBy"])),
            limit: lenient::count(&fields.take(&["limit"])),
        })
    }
}

impl ViewCriteria {
    /// Replace the search query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Replace the category filter.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    /// Replace the sort key.
    #[must_use]
    pub const fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Truncate results to at most `limit` items.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
