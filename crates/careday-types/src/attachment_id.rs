use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Opaque id assigned by the remote attachment store.
///
/// Clients reference attachments by URL; the store itself is keyed by the
/// final path segment of that URL, which is what this type carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(String);

impl AttachmentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Extract the id from a reference URL's final path segment.
    ///
    /// A reference without an id segment yields an empty id; the remote
    /// store will fail to resolve it, which downstream completeness checks
    /// treat as a missing attachment.
    pub fn from_url(url: &Url) -> Self {
        let id = url
            .path()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
