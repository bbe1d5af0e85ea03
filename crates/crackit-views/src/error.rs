//! Error types for the crackit-views crate.
//!
//! The derivation stages are total and have no error type. These enums cover
//! the boundary: reading snapshot files, decoding them, and loading
//! settings for the command-line tool.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a record snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("failed to read snapshot at '{path}': {message}")]
    IoError {
        /// Path to the snapshot file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The snapshot is not well-formed JSON.
    #[error("invalid snapshot JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// A response envelope did not carry the expected collection.
    #[error("snapshot object has no '{key}' collection")]
    MissingCollection {
        /// Collection key that was looked up.
        key: &'static str,
    },

    /// The snapshot is neither an array nor an envelope object.
    #[error("snapshot must be a JSON array or object, found {found}")]
    UnexpectedShape {
        /// JSON type that was found instead.
        found: &'static str,
    },
}

/// Errors surfaced by the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// Layered settings could not be loaded.
    #[error("failed to load settings: {message}")]
    Settings {
        /// Description of the settings failure.
        message: String,
    },

    /// The derived view could not be encoded.
    #[error("failed to encode derived view: {message}")]
    Encode {
        /// Description of the encoding failure.
        message: String,
    },

    /// The record snapshot could not be loaded.
    #[error("snapshot error: {source}")]
    Snapshot {
        /// Underlying snapshot error.
        #[from]
        #[source]
        source: SnapshotError,
    },
}
