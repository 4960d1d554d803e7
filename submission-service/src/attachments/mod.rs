// ============================================================================
// Attachments
// ============================================================================
//
// Attachments live in a remote store and are referenced by URL from
// redistribution messages. The client (client.rs) talks to the store with
// bounded retry; the service (service.rs) fans operations out across all
// attachments of one message.
//
// ============================================================================

pub mod client;
pub mod service;

use serde::{Deserialize, Serialize};

/// Owner claim the remote store authorizes operations against. A mismatched
/// owner fails remotely; it is never checked locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOwner {
    pub owner_national_id: String,
}

impl DocumentOwner {
    pub fn new(national_id: impl Into<String>) -> Self {
        Self {
            owner_national_id: national_id.into(),
        }
    }
}

/// An attachment as stored in and returned by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
    pub content_type: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<DocumentOwner>,
}

/// Attachment content travels as base64 on the wire.
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_round_trips_as_base64() {
        let attachment = Attachment {
            content: b"%PDF-1.4 custody agreement".to_vec(),
            content_type: "application/pdf".to_string(),
            title: "custody agreement".to_string(),
            owner: Some(DocumentOwner::new("25108500096")),
        };

        let json = serde_json::to_value(&attachment).unwrap();
        assert!(json["content"].is_string());
        assert_eq!(json["owner"]["ownerNationalId"], "25108500096");

        let back: Attachment = serde_json::from_value(json).unwrap();
        assert_eq!(back, attachment);
    }
}
