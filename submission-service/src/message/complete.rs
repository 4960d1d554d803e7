// ============================================================================
// Completed Record
// ============================================================================
//
// The immutable, fully-resolved record composed just before publish. A
// message is consumed to build exactly one record; redistribution reference
// URLs are replaced by the store ids the attachments were retained under.
//
// ============================================================================

use careday_types::AttachmentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{CoronaTransfer, Message, MessageCommon, RecipientRelation, SpouseTransfer};
use crate::clients::applicant::ResolvedApplicant;

/// Redistribution payload with attachment references resolved to store ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedRedistribution {
    pub recipient_relation: RecipientRelation,
    pub custody_agreement_attachment_ids: Vec<AttachmentId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CompletedPayload {
    CoronaTransfer {
        corona: CoronaTransfer,
    },
    SpouseTransfer {
        transfer: SpouseTransfer,
    },
    Redistribution {
        redistribution: CompletedRedistribution,
    },
}

/// What gets serialized onto the durable log for one accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedRecord {
    pub received_at: DateTime<Utc>,
    pub applicant: ResolvedApplicant,
    #[serde(flatten)]
    pub common: MessageCommon,
    #[serde(flatten)]
    pub payload: CompletedPayload,
}

impl CompletedRecord {
    /// Consume a validated message and the resolved applicant into the
    /// record to publish.
    pub fn from_message(
        message: Message,
        applicant: ResolvedApplicant,
        received_at: DateTime<Utc>,
    ) -> Self {
        let (common, payload) = match message {
            Message::CoronaTransfer { common, corona } => {
                (common, CompletedPayload::CoronaTransfer { corona })
            }
            Message::SpouseTransfer { common, transfer } => {
                (common, CompletedPayload::SpouseTransfer { transfer })
            }
            Message::Redistribution {
                common,
                redistribution,
            } => {
                let custody_agreement_attachment_ids = redistribution.attachment_ids();
                (
                    common,
                    CompletedPayload::Redistribution {
                        redistribution: CompletedRedistribution {
                            recipient_relation: redistribution.recipient_relation,
                            custody_agreement_attachment_ids,
                        },
                    },
                )
            }
        };

        Self {
            received_at,
            applicant,
            common,
            payload,
        }
    }

    pub fn submission_id(&self) -> &str {
        &self.common.submission_id
    }

    /// Wire name of the message type, matching the serde tag.
    pub fn message_type(&self) -> &'static str {
        match self.payload {
            CompletedPayload::CoronaTransfer { .. } => "coronaTransfer",
            CompletedPayload::SpouseTransfer { .. } => "spouseTransfer",
            CompletedPayload::Redistribution { .. } => "redistribution",
        }
    }
}
