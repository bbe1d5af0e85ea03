//! Lenient decoding helpers for loosely typed JSON payloads.
//!
//! Payloads are buffered as a [`Value`] object, which accepts any well-formed
//! JSON, and each field is then coerced. A field may arrive under several
//! names (`_id`/`id`, `createdAt`/`created_at`); [`Fields::take`] resolves
//! them in one place so a payload carrying both spellings still decodes.
//! Nothing in here returns an error for a well-formed JSON object.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{EntityRef, OwnerRef, RecordId};

/// Keys tried, in order, for an entity's display name.
const NAME_KEYS: [&str; 4] = ["name", "fullname", "fullName", "username"];

/// Names under which a backend identifier may appear, preferred first.
pub(crate) const ID_KEYS: [&str; 2] = ["_id", "id"];

/// A JSON object whose fields are read by any of several names.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub(crate) struct Fields(Map<String, Value>);

impl Fields {
    /// Removes every name in `names` and returns the first non-null value,
    /// or [`Value::Null`] when none is present.
    pub(crate) fn take(&mut self, names: &[&str]) -> Value {
        names
            .iter()
            .filter_map(|name| self.0.remove(*name))
            .fold(Value::Null, |found, value| {
                if found.is_null() { value } else { found }
            })
    }
}

impl From<Value> for RecordId {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self(text),
            Value::Number(number) => Self(number.to_string()),
            Value::Object(mut object) => object
                .remove("$oid")
                .map(Self::from)
                .unwrap_or_default(),
            Value::Null | Value::Bool(_) | Value::Array(_) => Self::default(),
        }
    }
}

impl From<Value> for EntityRef {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(object) => {
                let mut fields = Fields(object);
                let id = RecordId::from(fields.take(&ID_KEYS));
                let name = NAME_KEYS
                    .iter()
                    .find_map(|key| non_empty_text(fields.take(&[*key])))
                    .unwrap_or_default();
                Self { id, name }
            }
            Value::String(_) | Value::Number(_) => Self {
                id: RecordId::from(value),
                name: String::new(),
            },
            Value::Null | Value::Bool(_) | Value::Array(_) => Self::default(),
        }
    }
}

fn non_empty_text(value: Value) -> Option<String> {
    let label = text(value);
    (!label.is_empty()).then_some(label)
}

/// Text; anything that is not a string, number, or boolean becomes empty.
pub(crate) fn text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Boolean flag; accepts `true`/`false`, `"true"`/`"false"`, and `1`/`0`.
pub(super) fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        Value::Number(number) => number.as_i64().is_some_and(|n| n != 0),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Optional owner reference; `null` means no owner.
pub(super) fn owner(value: Value) -> Option<OwnerRef> {
    (!value.is_null()).then(|| OwnerRef::from(value))
}

/// Sequence whose undecodable elements are dropped; non-arrays are empty.
pub(super) fn sequence<T: DeserializeOwned>(value: Value) -> Vec<T> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

/// Non-negative count such as a page size; anything else is absent.
pub(crate) fn count(value: &Value) -> Option<usize> {
    value.as_u64().and_then(|n| usize::try_from(n).ok())
}

/// Salary magnitude; accepts numbers and numeric text such as `"50,000"`,
/// `"12 LPA"`, or `"Rs. 50000"`. Non-finite and unparseable values are
/// treated as absent.
pub(super) fn salary(value: &Value) -> Option<f64> {
    let magnitude = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_leading_number(text),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    };
    magnitude.filter(|salary| salary.is_finite())
}

/// Parses the first run of digits in `raw`, ignoring thousands separators.
/// A `-` directly before the digits makes the number negative.
fn parse_leading_number(raw: &str) -> Option<f64> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let (prefix, rest) = raw.split_at(start);
    let sign = if prefix.ends_with('-') { "-" } else { "" };
    let digits: String = rest
        .chars()
        .filter(|c| *c != ',')
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    format!("{sign}{digits}").parse().ok()
}

/// Creation timestamp; accepts RFC 3339 text, naive ISO timestamps, bare
/// dates, and epoch milliseconds.
pub(super) fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_timestamp(text),
        Value::Number(number) => number.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse the timestamp formats the backend and hand-written fixtures use.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    //! Coercion rules for malformed or loosely typed backend fields.

    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Fields {
        serde_json::from_value(value).expect("object decodes")
    }

    #[rstest]
    #[case(json!(120_000), Some(120_000.0))]
    #[case(json!(12.5), Some(12.5))]
    #[case(json!("50,000"), Some(50_000.0))]
    #[case(json!("12 LPA"), Some(12.0))]
    #[case(json!("$90000"), Some(90_000.0))]
    #[case(json!("Rs. 50000"), Some(50_000.0))]
    #[case(json!("-5"), Some(-5.0))]
    #[case(json!("negotiable"), None)]
    #[case(json!(null), None)]
    #[case(json!(true), None)]
    fn salary_is_coerced(#[case] input: Value, #[case] expected: Option<f64>) {
        assert_eq!(salary(&input), expected);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let mut empty = fields(json!({}));
        assert_eq!(salary(&empty.take(&["salary"])), None);
        assert_eq!(timestamp(&empty.take(&["createdAt"])), None);
        assert!(!flag(&empty.take(&["isPrivate"])));
        assert_eq!(text(empty.take(&["title"])), "");
        assert_eq!(count(&empty.take(&["limit"])), None);
    }

    #[rstest]
    #[case(json!({ "_id": "a", "id": "b" }), json!("a"))]
    #[case(json!({ "_id": null, "id": "b" }), json!("b"))]
    #[case(json!({ "id": 7 }), json!(7))]
    #[case(json!({ "name": "x" }), Value::Null)]
    fn aliased_fields_prefer_the_first_present_name(
        #[case] input: Value,
        #[case] expected: Value,
    ) {
        let mut object = fields(input);
        assert_eq!(object.take(&ID_KEYS), expected);
        assert_eq!(object.take(&ID_KEYS), Value::Null);
    }

    #[test]
    fn non_objects_are_not_field_sets() {
        assert!(serde_json::from_value::<Fields>(json!([1, 2])).is_err());
    }

    #[rstest]
    #[case("2024-01-01", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single())]
    #[case("2024-02-01T10:30:00Z", Utc.with_ymd_and_hms(2024, 2, 1, 10, 30, 0).single())]
    #[case("2024-02-01T10:30:00+02:00", Utc.with_ymd_and_hms(2024, 2, 1, 8, 30, 0).single())]
    #[case("2024-02-01T10:30:00.250", Utc.with_ymd_and_hms(2024, 2, 1, 10, 30, 0).single().map(|t| t + chrono::Duration::milliseconds(250)))]
    #[case("yesterday", None)]
    #[case("", None)]
    fn timestamps_are_parsed(#[case] raw: &str, #[case] expected: Option<DateTime<Utc>>) {
        assert_eq!(parse_timestamp(raw), expected);
    }

    #[test]
    fn epoch_milliseconds_are_accepted() {
        assert_eq!(
            timestamp(&json!(1_704_067_200_000_i64)),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single()
        );
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!("TRUE"), true)]
    #[case(json!(1), true)]
    #[case(json!("no"), false)]
    #[case(json!(0), false)]
    #[case(json!(null), false)]
    fn flags_are_coerced(#[case] input: Value, #[case] expected: bool) {
        assert_eq!(flag(&input), expected);
    }

    #[rstest]
    #[case(json!("Remote"), "Remote")]
    #[case(json!(3), "3")]
    #[case(json!(null), "")]
    #[case(json!(["a"]), "")]
    fn text_is_coerced(#[case] input: Value, #[case] expected: &str) {
        assert_eq!(text(input), expected);
    }

    #[rstest]
    #[case(json!(5), Some(5))]
    #[case(json!(0), Some(0))]
    #[case(json!(-1), None)]
    #[case(json!("5"), None)]
    #[case(json!(null), None)]
    fn counts_are_coerced(#[case] input: Value, #[case] expected: Option<usize>) {
        assert_eq!(count(&input), expected);
    }

    #[test]
    fn mongo_object_ids_are_unwrapped() {
        let id = RecordId::from(json!({ "$oid": "65f0c1" }));
        assert_eq!(id.as_str(), "65f0c1");
    }

    #[test]
    fn entity_names_fall_back_to_alternate_keys() {
        let reference = EntityRef::from(json!({ "_id": "u1", "fullname": "Ada Lovelace" }));
        assert_eq!(reference.name(), "Ada Lovelace");
    }

    #[test]
    fn entity_ids_prefer_the_mongo_key() {
        let reference = EntityRef::from(json!({ "_id": "u1", "id": "u1-virtual" }));
        assert_eq!(reference.id().as_str(), "u1");
    }
}
