use async_trait::async_trait;
use careday_error::{AppError, AppResult};
use careday_types::CorrelationId;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::auth::IdToken;

/// Minimum age for submitting care-day messages.
pub const LEGAL_AGE_YEARS: u32 = 18;

/// The applicant as resolved by the identity lookup service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedApplicant {
    pub actor_id: String,
    pub national_id: String,
    pub birth_date: NaiveDate,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
}

impl ResolvedApplicant {
    /// Whether the applicant has come of age on the given date.
    pub fn is_of_legal_age(&self, on: NaiveDate) -> bool {
        on.years_since(self.birth_date)
            .map_or(false, |years| years >= LEGAL_AGE_YEARS)
    }
}

/// Resolves the authenticated caller to their registered identity.
///
/// Access denial (for example a citizen under guardianship restrictions) is
/// a distinct outcome from the applicant simply not being found.
#[async_trait]
pub trait ApplicantResolver: Send + Sync {
    async fn resolve(
        &self,
        token: &IdToken,
        correlation_id: &CorrelationId,
    ) -> AppResult<ResolvedApplicant>;
}

/// Identity fields returned by the lookup service. The national identifier
/// is not part of the response; it is the token's subject claim.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicantLookupResponse {
    actor_id: String,
    birth_date: NaiveDate,
    first_name: String,
    #[serde(default)]
    middle_name: Option<String>,
    last_name: String,
}

pub struct HttpApplicantResolver {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApplicantResolver {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl ApplicantResolver for HttpApplicantResolver {
    async fn resolve(
        &self,
        token: &IdToken,
        correlation_id: &CorrelationId,
    ) -> AppResult<ResolvedApplicant> {
        let url = format!("{}/me", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .bearer_auth(&token.raw)
            .header("Accept", "application/json")
            .header("X-Correlation-ID", correlation_id.as_str())
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let lookup: ApplicantLookupResponse = response.json().await?;
                Ok(ResolvedApplicant {
                    actor_id: lookup.actor_id,
                    national_id: token.subject.clone(),
                    birth_date: lookup.birth_date,
                    first_name: lookup.first_name,
                    middle_name: lookup.middle_name,
                    last_name: lookup.last_name,
                })
            }
            StatusCode::FORBIDDEN | StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS => {
                Err(AppError::access_denied("applicant lookup denied access"))
            }
            StatusCode::NOT_FOUND => Err(AppError::NotFound("applicant".to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::error!(
                    status = %status,
                    body = %body,
                    correlation_id = %correlation_id,
                    "Applicant lookup failed"
                );
                Err(AppError::transport(format!(
                    "applicant lookup returned {}",
                    status
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant_born(year: i32, month: u32, day: u32) -> ResolvedApplicant {
        ResolvedApplicant {
            actor_id: "actor".to_string(),
            national_id: "25108500096".to_string(),
            birth_date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            first_name: "Ola".to_string(),
            middle_name: None,
            last_name: "Nordmann".to_string(),
        }
    }

    #[test]
    fn eighteen_years_to_the_day_is_of_age() {
        let applicant = applicant_born(2000, 6, 15);
        let eighteenth = NaiveDate::from_ymd_opt(2018, 6, 15).unwrap();
        assert!(applicant.is_of_legal_age(eighteenth));
    }

    #[test]
    fn day_before_eighteenth_birthday_is_underage() {
        let applicant = applicant_born(2000, 6, 15);
        let day_before = NaiveDate::from_ymd_opt(2018, 6, 14).unwrap();
        assert!(!applicant.is_of_legal_age(day_before));
    }

    #[test]
    fn birth_date_in_the_future_is_underage() {
        let applicant = applicant_born(2030, 1, 1);
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(!applicant.is_of_legal_age(today));
    }
}
