// ============================================================================
// Caller Identity Extractors
// ============================================================================
//
// This service runs behind a gateway that terminates authentication; tokens
// arriving here have already had their signatures verified. The extractors
// below pull the caller's identity out of the bearer token and the tracing
// metadata out of the request headers.
//
// ============================================================================

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use careday_error::AppError;
use careday_types::CorrelationId;
use serde_json::Value;

const CORRELATION_ID_HEADER: &str = "x-correlation-id";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Bearer token presented by the caller.
///
/// The raw value is passed through to downstream services; the subject claim
/// is the caller's national identifier and doubles as the owner claim for
/// attachment operations.
#[derive(Debug, Clone)]
pub struct IdToken {
    pub raw: String,
    pub subject: String,
}

impl IdToken {
    /// Parse a bearer token value into its raw form and subject claim.
    pub fn from_bearer(raw: &str) -> Result<Self, AppError> {
        let payload = raw
            .split('.')
            .nth(1)
            .ok_or_else(|| AppError::auth("token is not a JWT"))?;

        let decoded = URL_SAFE_NO_PAD
            .decode(payload.as_bytes())
            .map_err(|_| AppError::auth("token payload is not valid base64"))?;

        let claims: Value = serde_json::from_slice(&decoded)
            .map_err(|_| AppError::auth("token payload is not valid JSON"))?;

        let subject = claims
            .get("sub")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::auth("token is missing the 'sub' claim"))?
            .to_string();

        Ok(Self {
            raw: raw.to_string(),
            subject,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for IdToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::auth("missing Authorization header"))?;

        let raw = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth("Authorization header is not a bearer token"))?;

        IdToken::from_bearer(raw)
    }
}

/// Per-request tracing metadata: the correlation id propagated to every
/// collaborator, and the request id the gateway stamped on the request.
#[derive(Debug, Clone)]
pub struct CallContext {
    pub correlation_id: CorrelationId,
    pub request_id: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for CallContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(CorrelationId::from)
            .unwrap_or_default();

        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(Self {
            correlation_id,
            request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "eyJhbGciOiJSUzI1NiJ9.{}.c2lnbmF0dXJl",
            URL_SAFE_NO_PAD.encode(payload.as_bytes())
        )
    }

    #[test]
    fn extracts_subject_claim() {
        let raw = token_with_payload(r#"{"sub":"25108500096","iss":"gateway"}"#);
        let token = IdToken::from_bearer(&raw).unwrap();
        assert_eq!(token.subject, "25108500096");
        assert_eq!(token.raw, raw);
    }

    #[test]
    fn rejects_token_without_subject() {
        let raw = token_with_payload(r#"{"iss":"gateway"}"#);
        assert!(matches!(
            IdToken::from_bearer(&raw),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn rejects_non_jwt_value() {
        assert!(matches!(
            IdToken::from_bearer("not-a-jwt"),
            Err(AppError::Auth(_))
        ));
    }
}
