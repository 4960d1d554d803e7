use async_trait::async_trait;
use careday_types::CorrelationId;
use serde::{Deserialize, Serialize};

use crate::auth::IdToken;

/// One of the caller's currently registered children, as known to the
/// relationship lookup service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildIdPair {
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
}

/// Lists the caller's currently registered children.
///
/// This lookup never fails the submission: transport problems degrade to an
/// empty list, and validation then rejects any child claim that stays
/// without an identifier. "No children found" and "lookup unreachable" are
/// deliberately indistinguishable to the saga.
#[async_trait]
pub trait ChildrenLookup: Send + Sync {
    async fn current_children(
        &self,
        token: &IdToken,
        correlation_id: &CorrelationId,
    ) -> Vec<ChildIdPair>;
}

#[derive(Debug, Deserialize)]
struct ChildrenResponse {
    children: Vec<ChildIdPair>,
}

pub struct HttpChildrenLookup {
    http: reqwest::Client,
    base_url: String,
}

impl HttpChildrenLookup {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    async fn request_children(
        &self,
        token: &IdToken,
        correlation_id: &CorrelationId,
    ) -> Result<Vec<ChildIdPair>, reqwest::Error> {
        let url = format!("{}/children", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .bearer_auth(&token.raw)
            .header("Accept", "application/json")
            .header("X-Correlation-ID", correlation_id.as_str())
            .send()
            .await?
            .error_for_status()?;

        let body: ChildrenResponse = response.json().await?;
        Ok(body.children)
    }
}

#[async_trait]
impl ChildrenLookup for HttpChildrenLookup {
    async fn current_children(
        &self,
        token: &IdToken,
        correlation_id: &CorrelationId,
    ) -> Vec<ChildIdPair> {
        match self.request_children(token, correlation_id).await {
            Ok(children) => children,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    correlation_id = %correlation_id,
                    "Children lookup failed, continuing with an empty list"
                );
                Vec::new()
            }
        }
    }
}
