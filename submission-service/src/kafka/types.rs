use careday_types::CorrelationId;
use serde::{Deserialize, Serialize};

/// Envelope metadata wrapping every published record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub version: u32,
    pub correlation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl Metadata {
    /// Version bumped on breaking changes to the record wire format.
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(correlation_id: &CorrelationId, request_id: Option<String>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            correlation_id: correlation_id.to_string(),
            request_id,
        }
    }
}

/// What actually lands on the topic: `{ "metadata": ..., "data": ... }`,
/// keyed by submission id so consumers see one partition per submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicEntry<V> {
    pub metadata: Metadata,
    pub data: V,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metadata_serializes_camel_case() {
        let metadata = Metadata::new(&CorrelationId::from("corr-1"), Some("req-1".to_string()));
        let entry = TopicEntry {
            metadata,
            data: json!({"submissionId": "abc"}),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["metadata"]["version"], 1);
        assert_eq!(value["metadata"]["correlationId"], "corr-1");
        assert_eq!(value["metadata"]["requestId"], "req-1");
        assert_eq!(value["data"]["submissionId"], "abc");
    }

    #[test]
    fn absent_request_id_is_omitted() {
        let metadata = Metadata::new(&CorrelationId::from("corr-1"), None);
        let value = serde_json::to_value(&metadata).unwrap();
        assert!(value.get("requestId").is_none());
    }
}
