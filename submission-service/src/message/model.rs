use careday_types::AttachmentId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::closure::ClosurePeriod;
use crate::clients::children::ChildIdPair;

fn fresh_submission_id() -> String {
    Uuid::new_v4().to_string()
}

/// The caller's registered work situations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkSituation {
    Employee,
    SelfEmployed,
    Freelancer,
    Other,
}

/// Relation between the applicant and the designated recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecipientRelation {
    Spouse,
    Cohabitant,
    CoParent,
}

/// A child the applicant claims care days for.
///
/// `national_id` may be absent on receipt; enrichment backfills it from the
/// relationship lookup before validation requires it to be present and
/// checksum-valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildClaim {
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
    pub name: String,
    pub birth_date: NaiveDate,
    // Absent rather than defaulted: a missing answer must fail validation,
    // not silently become false.
    #[serde(default)]
    pub sole_custody: Option<bool>,
    #[serde(default)]
    pub extended_right: Option<bool>,
}

impl ChildClaim {
    pub fn is_missing_national_id(&self) -> bool {
        self.national_id.as_deref().map_or(true, str::is_empty)
    }
}

/// Fields shared by every message variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCommon {
    #[serde(default = "fresh_submission_id")]
    pub submission_id: String,
    pub language: String,
    pub has_understood_rights_and_duties: bool,
    pub has_confirmed_details: bool,
    pub recipient_name: String,
    pub recipient_national_id: String,
    pub work_situation: Vec<WorkSituation>,
    pub children: Vec<ChildClaim>,
}

/// Transfer of care days made available by pandemic closures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoronaTransfer {
    pub days_to_transfer: i32,
    pub closure_period: ClosurePeriod,
}

/// Ordinary transfer to a spouse or cohabitant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpouseTransfer {
    pub recipient_relation: RecipientRelation,
    pub days_to_transfer: i32,
}

/// Redistribution to a co-parent, optionally documented by custody
/// agreements held in the remote attachment store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redistribution {
    pub recipient_relation: RecipientRelation,
    #[serde(default)]
    pub custody_agreement_refs: Vec<Url>,
}

impl Redistribution {
    /// Store ids of every referenced custody agreement, in reference order.
    pub fn attachment_ids(&self) -> Vec<AttachmentId> {
        self.custody_agreement_refs
            .iter()
            .map(AttachmentId::from_url)
            .collect()
    }
}

/// A submitted message, discriminated by the `type` field on the wire.
///
/// Exactly one payload exists per message by construction; there is no
/// "three optional payloads, pick by enum" state to misuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    CoronaTransfer {
        #[serde(flatten)]
        common: MessageCommon,
        corona: CoronaTransfer,
    },
    SpouseTransfer {
        #[serde(flatten)]
        common: MessageCommon,
        transfer: SpouseTransfer,
    },
    Redistribution {
        #[serde(flatten)]
        common: MessageCommon,
        redistribution: Redistribution,
    },
}

impl Message {
    pub fn common(&self) -> &MessageCommon {
        match self {
            Message::CoronaTransfer { common, .. }
            | Message::SpouseTransfer { common, .. }
            | Message::Redistribution { common, .. } => common,
        }
    }

    pub fn submission_id(&self) -> &str {
        &self.common().submission_id
    }

    /// Wire name of the message type, matching the serde tag.
    pub fn message_type(&self) -> &'static str {
        match self {
            Message::CoronaTransfer { .. } => "coronaTransfer",
            Message::SpouseTransfer { .. } => "spouseTransfer",
            Message::Redistribution { .. } => "redistribution",
        }
    }

    /// The redistribution payload, when this message carries one.
    pub fn redistribution(&self) -> Option<&Redistribution> {
        match self {
            Message::Redistribution { redistribution, .. } => Some(redistribution),
            _ => None,
        }
    }

    /// Backfill absent child national identifiers from the caller's
    /// currently registered children, matched by actor id.
    ///
    /// Returns a new message; identifiers already present are never
    /// overwritten, so the transform is idempotent.
    pub fn enrich(mut self, registered_children: &[ChildIdPair]) -> Self {
        let common = match &mut self {
            Message::CoronaTransfer { common, .. }
            | Message::SpouseTransfer { common, .. }
            | Message::Redistribution { common, .. } => common,
        };

        for child in &mut common.children {
            if !child.is_missing_national_id() {
                continue;
            }
            let Some(actor_id) = child.actor_id.as_deref() else {
                continue;
            };
            if let Some(national_id) = registered_children
                .iter()
                .find(|pair| pair.actor_id.as_deref() == Some(actor_id))
                .and_then(|pair| pair.national_id.clone())
            {
                child.national_id = Some(national_id);
            }
        }

        self
    }
}
