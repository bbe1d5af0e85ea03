//! Loading record collections from JSON snapshots.
//!
//! A snapshot is what the networking layer already fetched: either a bare
//! array of records or the backend's response envelope carrying the array
//! under the kind's collection key (`{"success": true, "jobs": [...]}`).
//! Elements that are not records are skipped with a warning rather than
//! failing the whole collection.

use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::SnapshotError;
use crate::record::Listing;

/// Decode a collection of `R` from JSON text.
///
/// # Errors
///
/// Returns [`SnapshotError`] when the text is not JSON, is neither an array
/// nor an object, or is an object without the kind's collection key.
///
/// # Examples
///
/// ```
/// use crackit_views::{JobRecord, decode_collection};
///
/// let envelope = r#"{"success": true, "jobs": [{"_id": "j1", "title": "Intern"}]}"#;
/// let jobs: Vec<JobRecord> = decode_collection(envelope).expect("valid snapshot");
/// assert_eq!(jobs.len(), 1);
/// ```
pub fn decode_collection<R>(json: &str) -> Result<Vec<R>, SnapshotError>
where
    R: Listing + DeserializeOwned,
{
    let value: Value = serde_json::from_str(json).map_err(|e| SnapshotError::ParseError {
        message: e.to_string(),
    })?;
    let items = collection_items::<R>(value)?;
    Ok(decode_items(items))
}

/// Read and decode a snapshot file.
///
/// The file is opened through a capability handle on its parent directory.
///
/// # Errors
///
/// Returns [`SnapshotError::IoError`] when the file cannot be read, and the
/// errors of [`decode_collection`] otherwise.
pub fn load_collection<R>(path: &Path) -> Result<Vec<R>, SnapshotError>
where
    R: Listing + DeserializeOwned,
{
    let contents = read_snapshot(path)?;
    decode_collection(&contents)
}

fn read_snapshot(path: &Path) -> Result<String, SnapshotError> {
    let io_error = |message: String| SnapshotError::IoError {
        path: path.to_path_buf(),
        message,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io_error("path has no file name".to_owned()))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|e| io_error(e.to_string()))?;
    dir.read_to_string(file_name)
        .map_err(|e| io_error(e.to_string()))
}

fn collection_items<R: Listing>(value: Value) -> Result<Vec<Value>, SnapshotError> {
    let key = R::KIND.collection_key();
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut envelope) => match envelope.remove(key) {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) | None => Err(SnapshotError::MissingCollection { key }),
            Some(other) => Err(SnapshotError::UnexpectedShape {
                found: json_type(&other),
            }),
        },
        other => Err(SnapshotError::UnexpectedShape {
            found: json_type(&other),
        }),
    }
}

fn decode_items<R>(items: Vec<Value>) -> Vec<R>
where
    R: Listing + DeserializeOwned,
{
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(kind = %R::KIND, index, %error, "skipping undecodable record");
                None
            }
        })
        .collect()
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    //! Snapshot shapes accepted and rejected by the loader.

    use rstest::rstest;

    use super::*;
    use crate::record::{JobRecord, NewsletterRecord};

    #[test]
    fn bare_arrays_decode() {
        let jobs: Vec<JobRecord> =
            decode_collection(r#"[{"id": 1}, {"id": 2}]"#).expect("snapshot decodes");
        assert_eq!(jobs.len(), 2);
    }

    #[test]
    fn envelopes_use_the_kind_collection_key() {
        let json = r#"{"success": true, "newsletters": [{"_id": "n1", "isPrivate": false}]}"#;
        let articles: Vec<NewsletterRecord> = decode_collection(json).expect("snapshot decodes");
        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn non_record_elements_are_skipped() {
        let jobs: Vec<JobRecord> =
            decode_collection(r#"[{"id": 1}, 7, "x", null, {"id": 2}]"#).expect("snapshot decodes");
        let ids: Vec<&str> = jobs.iter().map(|job| job.id().as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn records_carrying_both_id_spellings_are_kept() {
        let jobs: Vec<JobRecord> =
            decode_collection(r#"[{"_id": "a", "id": "a", "title": "x"}]"#)
                .expect("snapshot decodes");
        let ids: Vec<&str> = jobs.iter().map(|job| job.id().as_str()).collect();
        assert_eq!(ids, ["a"]);
    }

    #[rstest]
    #[case("not json", None)]
    #[case(r#"{"success": true}"#, Some(SnapshotError::MissingCollection { key: "jobs" }))]
    #[case(r#"{"jobs": null}"#, Some(SnapshotError::MissingCollection { key: "jobs" }))]
    #[case(r#"{"jobs": {"id": 1}}"#, Some(SnapshotError::UnexpectedShape { found: "object" }))]
    #[case(r#""jobs""#, Some(SnapshotError::UnexpectedShape { found: "string" }))]
    fn malformed_snapshots_are_rejected(
        #[case] json: &str,
        #[case] expected: Option<SnapshotError>,
    ) {
        let result = decode_collection::<JobRecord>(json);
        match expected {
            Some(error) => assert_eq!(result, Err(error)),
            None => assert!(matches!(result, Err(SnapshotError::ParseError { .. }))),
        }
    }

    #[test]
    fn missing_files_report_their_path() {
        let path = Path::new("definitely/not/here/jobs.json");
        let result = load_collection::<JobRecord>(path);
        assert!(matches!(
            result,
            Err(SnapshotError::IoError { path: reported, .. }) if reported == path
        ));
    }
}
