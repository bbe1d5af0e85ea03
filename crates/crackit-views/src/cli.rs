//! Command-line surface: derive a view from a snapshot file.
//!
//! The binary delegates here so the behaviour is testable without spawning a
//! process. Flags override [`ViewSettings`]; settings override built-in
//! defaults.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::criteria::{CategoryFilter, SortKey, ViewCriteria};
use crate::error::CliError;
use crate::record::{JobRecord, Listing, NewsletterRecord, RecordId};
use crate::settings::ViewSettings;
use crate::snapshot::load_collection;
use crate::view::compose_view;
use crate::viewer::{Role, ScopeMode, ViewerContext};

/// Collection held by the snapshot file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Collection {
    /// Job postings.
    #[default]
    Jobs,
    /// Newsletter articles.
    Newsletters,
}

/// Arguments accepted by the `crackit-views` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "crackit-views",
    about = "Derive the filtered, sorted listing a viewer would see from a JSON snapshot"
)]
pub struct Args {
    /// Path to a JSON snapshot: an array of records or a response envelope.
    #[arg(long, value_name = "PATH")]
    pub records: PathBuf,
    /// Which collection the snapshot holds.
    #[arg(long, value_enum, default_value_t = Collection::Jobs)]
    pub kind: Collection,
    /// Free-text search query.
    #[arg(long, default_value = "")]
    pub query: String,
    /// Category (job type) to keep, or `all`.
    #[arg(long, default_value = CategoryFilter::ALL)]
    pub category: String,
    /// Sort key: newest, oldest, or salary.
    #[arg(long)]
    pub sort: Option<String>,
    /// Maximum number of items to emit.
    #[arg(long)]
    pub limit: Option<usize>,
    /// Identity of the viewer; omit for an anonymous viewer.
    #[arg(long, value_name = "ID")]
    pub viewer_id: Option<String>,
    /// Viewer role: guest, student, recruiter, or admin.
    #[arg(long, default_value = "guest")]
    pub role: String,
    /// Scope mode: browse or own-only.
    #[arg(long, default_value = "browse")]
    pub mode: String,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// Criteria described by the flags, with settings filling the gaps.
    #[must_use]
    pub fn criteria(&self, settings: &ViewSettings) -> ViewCriteria {
        let sort_key = self
            .sort
            .as_deref()
            .map_or_else(|| settings.sort_key(), SortKey::parse);
        ViewCriteria {
            query: self.query.clone(),
            category: CategoryFilter::parse(&self.category),
            sort_key,
            limit: self.limit.or(settings.limit),
        }
    }

    /// Viewer described by the flags.
    #[must_use]
    pub fn viewer(&self) -> ViewerContext {
        ViewerContext::new(
            self.viewer_id.clone().map(RecordId::from),
            Role::parse(&self.role),
            ScopeMode::parse(&self.mode),
        )
    }
}

/// Load the snapshot, compose the view, and render it as JSON text.
///
/// # Errors
///
/// Returns [`CliError`] when the snapshot cannot be loaded or the view
/// cannot be encoded.
pub fn run(args: &Args, settings: &ViewSettings) -> Result<String, CliError> {
    match args.kind {
        Collection::Jobs => render::<JobRecord>(args, settings),
        Collection::Newsletters => render::<NewsletterRecord>(args, settings),
    }
}

fn render<R>(args: &Args, settings: &ViewSettings) -> Result<String, CliError>
where
    R: Listing + DeserializeOwned + Serialize,
{
    let records: Vec<R> = load_collection(&args.records)?;
    let criteria = args.criteria(settings);
    let viewer = args.viewer();
    let view = compose_view(&records, &criteria, &viewer);

    info!(
        path = %args.records.display(),
        kind = %R::KIND,
        loaded = records.len(),
        total_count = view.total_count,
        filtered_count = view.filtered_count,
        shown = view.items.len(),
        "view derived from snapshot"
    );

    let encoded = if args.pretty {
        serde_json::to_string_pretty(&view)
    } else {
        serde_json::to_string(&view)
    };
    encoded.map_err(|e| CliError::Encode {
        message: e.to_string(),
    })
}
