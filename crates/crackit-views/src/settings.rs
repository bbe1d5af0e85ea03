//! Layered defaults for the command-line tool, loaded via OrthoConfig.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::criteria::SortKey;
use crate::error::CliError;

/// Program name handed to OrthoConfig; no CLI flags are parsed here, clap
/// owns those.
const PROGRAM_NAME: &str = "crackit-views";

/// Defaults applied when the matching command-line flag is absent.
///
/// Read from `CRACKIT_VIEWS_*` environment variables and OrthoConfig's
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CRACKIT_VIEWS")]
pub struct ViewSettings {
    /// Sort key used when `--sort` is not given.
    pub sort_key: Option<String>,
    /// Page size used when `--limit` is not given.
    pub limit: Option<usize>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl ViewSettings {
    /// Load settings from the environment and configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Settings`] when a configured value cannot be
    /// parsed.
    pub fn load_layered() -> Result<Self, CliError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|e| CliError::Settings {
            message: e.to_string(),
        })
    }

    /// Configured default sort key; unknown or absent values mean
    /// [`SortKey::Newest`].
    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
            .as_deref()
            .map(SortKey::parse)
            .unwrap_or_default()
    }
}
