//! Normalization, filtering and ordering of upstream records.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use shared::{Error, Result};

use crate::since::SinceFilter;

/// Field carrying the copy of the upstream `id`.
pub const IDENTITY_FIELD: &str = "identity";

/// Field carrying the copy of the upstream `changed` timestamp.
pub const UPDATED_FIELD: &str = "updated_at";

/// One upstream record with the normalized fields stamped on.
///
/// Serializes as a flat JSON object: every upstream field in its original
/// order, followed by [`IDENTITY_FIELD`] and [`UPDATED_FIELD`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    updated_at: String,
    fields: Map<String, Value>,
}

impl Record {
    /// Normalize a raw upstream record.
    pub fn from_upstream(raw: Value) -> Result<Self> {
        let mut fields = match raw {
            Value::Object(fields) => fields,
            other => {
                return Err(Error::Upstream(format!(
                    "Expected a JSON object per record, got {}",
                    other
                )))
            }
        };

        let identity = match fields.get("id") {
            Some(Value::Null) | None => {
                return Err(Error::Upstream("Upstream record has no id".to_string()))
            }
            Some(id) => id.clone(),
        };

        let updated_at = match fields.get("changed") {
            Some(Value::Null) | None => {
                return Err(Error::Upstream(format!(
                    "Upstream record {} has no changed timestamp",
                    identity
                )))
            }
            Some(Value::String(changed)) => changed.clone(),
            Some(other) => other.to_string(),
        };

        fields.insert(IDENTITY_FIELD.to_string(), identity);
        fields.insert(UPDATED_FIELD.to_string(), Value::String(updated_at.clone()));

        Ok(Self { updated_at, fields })
    }

    pub fn identity(&self) -> &Value {
        &self.fields[IDENTITY_FIELD]
    }

    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Apply the client-side `since` bound and order by update time.
///
/// With a bound, only records whose `updated_at` sorts strictly after the
/// bound's UTC rendering are kept. Comparison is lexical, which matches
/// chronological order for fixed-width UTC ISO-8601 strings. The sort is
/// stable, so records with equal timestamps keep their upstream order.
pub fn process(records: Vec<Record>, since: Option<&SinceFilter>) -> Vec<Record> {
    let mut records: Vec<Record> = match since.map(SinceFilter::upstream_value) {
        Some(bound) => records
            .into_iter()
            .filter(|record| record.updated_at() > bound.as_str())
            .collect(),
        None => records,
    };

    records.sort_by(|a, b| a.updated_at.cmp(&b.updated_at));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, changed: &str) -> Record {
        Record::from_upstream(json!({ "id": id, "changed": changed })).unwrap()
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r.identity().as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_normalize_keeps_upstream_fields() {
        let raw = json!({
            "name": { "text": "Launch party" },
            "id": "42",
            "changed": "2024-01-01T00:00:00Z",
        });

        let record = Record::from_upstream(raw).unwrap();
        assert_eq!(record.identity(), &json!("42"));
        assert_eq!(record.updated_at(), "2024-01-01T00:00:00Z");
        assert_eq!(record.fields()["name"]["text"], "Launch party");

        let keys: Vec<&str> = record.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "id", "changed", IDENTITY_FIELD, UPDATED_FIELD]);
    }

    #[test]
    fn test_non_string_changed_is_stringified() {
        let record = Record::from_upstream(json!({ "id": 7, "changed": 1700000000 })).unwrap();
        assert_eq!(record.identity(), &json!(7));
        assert_eq!(record.updated_at(), "1700000000");
    }

    #[test]
    fn test_rejects_incomplete_records() {
        assert!(matches!(
            Record::from_upstream(json!({ "changed": "2024-01-01T00:00:00Z" })),
            Err(Error::Upstream(_))
        ));
        assert!(matches!(
            Record::from_upstream(json!({ "id": "1", "changed": null })),
            Err(Error::Upstream(_))
        ));
        assert!(matches!(
            Record::from_upstream(json!(["1"])),
            Err(Error::Upstream(_))
        ));
    }

    #[test]
    fn test_sorts_ascending() {
        let records = vec![
            record("2", "2024-03-01T00:00:00Z"),
            record("1", "2024-01-01T00:00:00Z"),
        ];
        assert_eq!(ids(&process(records, None)), ["1", "2"]);
    }

    #[test]
    fn test_since_is_strictly_greater() {
        let records = vec![
            record("1", "2024-01-01T00:00:00Z"),
            record("2", "2024-02-01T00:00:00Z"),
            record("3", "2024-03-01T00:00:00Z"),
        ];
        let since = SinceFilter::parse("2024-02-01T00:00:00Z").unwrap();
        let kept = process(records, Some(&since));
        assert_eq!(ids(&kept), ["3"]);
    }

    #[test]
    fn test_offset_bound_is_compared_in_utc() {
        let records = vec![
            record("before", "2024-02-01T00:15:00Z"),
            record("after", "2024-02-01T01:00:00Z"),
        ];
        let since = SinceFilter::parse("2024-02-01T02:30:00+02:00").unwrap();
        assert_eq!(ids(&process(records, Some(&since))), ["after"]);
    }

    #[test]
    fn test_date_only_bound_excludes_midnight() {
        let records = vec![
            record("midnight", "2024-02-01T00:00:00Z"),
            record("later", "2024-02-01T00:00:01Z"),
        ];
        let since = SinceFilter::parse("2024-02-01").unwrap();
        assert_eq!(ids(&process(records, Some(&since))), ["later"]);
    }

    #[test]
    fn test_ties_keep_upstream_order() {
        let records = vec![
            record("b", "2024-01-01T00:00:00Z"),
            record("a", "2024-01-01T00:00:00Z"),
            record("c", "2023-12-31T00:00:00Z"),
        ];
        assert_eq!(ids(&process(records, None)), ["c", "b", "a"]);
    }

    #[test]
    fn test_serializes_flat() {
        let value = serde_json::to_value(record("1", "2024-01-01T00:00:00Z")).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1",
                "changed": "2024-01-01T00:00:00Z",
                "identity": "1",
                "updated_at": "2024-01-01T00:00:00Z",
            })
        );
    }
}
