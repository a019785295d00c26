//! Submission records and their stored document shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Stored submission document: the validated payload nested under
/// `formData`, with a server-assigned `submissionDate`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Store-assigned document id
    pub id: String,
    /// Mapping from field id to the user-entered value
    pub form_data: Map<String, Value>,
    /// Server-side write timestamp; may be observed before population
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub submission_date: Option<DateTime<Utc>>,
}

/// One validated response as presented to the admin viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Document id
    pub id: String,
    /// Creation time; the current time is substituted when the server
    /// timestamp has not been populated yet
    pub created_at: DateTime<Utc>,
    /// Mapping from field id to the user-entered value
    pub data: Map<String, Value>,
}

impl From<SubmissionRecord> for Submission {
    fn from(record: SubmissionRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.submission_date.unwrap_or_else(Utc::now),
            data: record.form_data,
        }
    }
}

/// Accept the timestamp as an RFC 3339 string, epoch milliseconds, or
/// absent. Unreadable values map to `None` so the reader substitutes the
/// current time instead of failing.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_round_trip() {
        let record = SubmissionRecord {
            id: "abc".into(),
            form_data: [("name".to_string(), json!("Ada"))].into_iter().collect(),
            submission_date: Some("2024-06-01T10:00:00Z".parse().unwrap()),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("formData"));
        assert!(json.contains("submissionDate"));
        assert_eq!(serde_json::from_str::<SubmissionRecord>(&json).unwrap(), record);
    }

    #[test]
    fn test_missing_timestamp_falls_back_to_now() {
        let record: SubmissionRecord =
            serde_json::from_value(json!({ "id": "x", "formData": {} })).unwrap();
        assert!(record.submission_date.is_none());

        let before = Utc::now();
        let submission = Submission::from(record);
        assert!(submission.created_at >= before);
    }

    #[test]
    fn test_millis_timestamp_accepted() {
        let record: SubmissionRecord = serde_json::from_value(json!({
            "id": "x",
            "formData": {},
            "submissionDate": 1717236000000i64,
        }))
        .unwrap();
        assert!(record.submission_date.is_some());
    }

    #[test]
    fn test_unreadable_timestamp_maps_to_none() {
        let record: SubmissionRecord = serde_json::from_value(json!({
            "id": "x",
            "formData": {},
            "submissionDate": "yesterday-ish",
        }))
        .unwrap();
        assert!(record.submission_date.is_none());
    }
}
