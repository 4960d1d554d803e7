// ============================================================================
// Submission Saga
// ============================================================================
//
// Sequences enrichment, validation, applicant resolution, attachment
// retention, record composition and the durable publish for one submission.
// This is the only place multiple external side effects are ordered with a
// rollback obligation: when the publish fails after attachments were
// retained, every retained attachment is deleted again and the caller sees
// SubmissionFailed regardless of how the cleanup went.
//
// ============================================================================

use std::sync::Arc;

use careday_error::{AppError, AppResult};
use careday_metrics::{
    COMPENSATING_DELETES_TOTAL, SUBMISSIONS_PUBLISHED_TOTAL, SUBMISSIONS_RECEIVED_TOTAL,
    SUBMISSIONS_REJECTED_TOTAL,
};
use careday_types::{AttachmentId, CorrelationId};
use chrono::Utc;
use tracing::{error, info};

use crate::attachments::service::AttachmentOps;
use crate::attachments::DocumentOwner;
use crate::auth::IdToken;
use crate::clients::applicant::ApplicantResolver;
use crate::clients::children::ChildrenLookup;
use crate::kafka::types::Metadata;
use crate::kafka::RecordPublisher;
use crate::message::validator;
use crate::message::{CompletedRecord, Message};

pub struct SubmissionService {
    applicant: Arc<dyn ApplicantResolver>,
    children: Arc<dyn ChildrenLookup>,
    attachments: Arc<dyn AttachmentOps>,
    publisher: Arc<dyn RecordPublisher>,
}

impl SubmissionService {
    pub fn new(
        applicant: Arc<dyn ApplicantResolver>,
        children: Arc<dyn ChildrenLookup>,
        attachments: Arc<dyn AttachmentOps>,
        publisher: Arc<dyn RecordPublisher>,
    ) -> Self {
        Self {
            applicant,
            children,
            attachments,
            publisher,
        }
    }

    /// Run one submission to Published or Failed.
    pub async fn register(
        &self,
        message: Message,
        metadata: Metadata,
        token: &IdToken,
        correlation_id: &CorrelationId,
    ) -> AppResult<()> {
        let submission_id = message.submission_id().to_string();
        let message_type = message.message_type();
        SUBMISSIONS_RECEIVED_TOTAL
            .with_label_values(&[message_type])
            .inc();
        info!(submission_id = %submission_id, message_type, "Submission received");

        // 1. Enrichment. Lookup errors degrade to an empty list inside the
        //    client, so a missing child identifier surfaces as a validation
        //    failure rather than a transport fault.
        let registered_children = self.children.current_children(token, correlation_id).await;
        let message = message.enrich(&registered_children);

        // 2. Validation. Nothing has had side effects yet.
        if let Err(violations) = validator::validate(&message) {
            SUBMISSIONS_REJECTED_TOTAL.inc();
            info!(
                submission_id = %submission_id,
                violation_count = violations.len(),
                "Submission rejected by validation"
            );
            return Err(AppError::Validation(violations));
        }

        // 3. Resolve the applicant and gate on legal age before any
        //    attachment work.
        let applicant = self.applicant.resolve(token, correlation_id).await?;
        if !applicant.is_of_legal_age(Utc::now().date_naive()) {
            return Err(AppError::access_denied(
                "the applicant is not of legal age",
            ));
        }

        // 4. Redistribution only: verify every referenced custody agreement
        //    is retrievable and within the size cap, then retain them under
        //    the applicant as owner.
        let retained = self
            .verify_and_retain_attachments(&message, &applicant.national_id, token, correlation_id)
            .await?;

        // 5. Compose the immutable record.
        let record = CompletedRecord::from_message(message, applicant, Utc::now());

        // 6. Publish; compensate on failure.
        match self.publisher.publish(&record, &metadata).await {
            Ok(_) => {
                SUBMISSIONS_PUBLISHED_TOTAL
                    .with_label_values(&[message_type])
                    .inc();
                info!(submission_id = %submission_id, "Submission registered");
                Ok(())
            }
            Err(publish_err) => {
                error!(
                    submission_id = %submission_id,
                    error = %publish_err,
                    "Publish failed, rolling back retained attachments"
                );
                self.compensate(&record, &retained, correlation_id).await;
                Err(AppError::SubmissionFailed(submission_id))
            }
        }
    }

    /// Fetch, completeness-check and retain redistribution attachments.
    /// Returns the retained ids so a later publish failure can roll them
    /// back. Non-redistribution messages retain nothing.
    async fn verify_and_retain_attachments(
        &self,
        message: &Message,
        applicant_national_id: &str,
        token: &IdToken,
        correlation_id: &CorrelationId,
    ) -> AppResult<Vec<AttachmentId>> {
        let Some(redistribution) = message.redistribution() else {
            return Ok(Vec::new());
        };
        if redistribution.custody_agreement_refs.is_empty() {
            return Ok(Vec::new());
        }

        let ids = redistribution.attachment_ids();
        let caller_owner = DocumentOwner::new(&token.subject);

        let fetched = self
            .attachments
            .fetch_all(&ids, token, &caller_owner, correlation_id)
            .await;
        validator::validate_attachments(&fetched, ids.len())?;

        let applicant_owner = DocumentOwner::new(applicant_national_id);
        self.attachments
            .retain_all(&ids, &applicant_owner, correlation_id)
            .await?;

        info!(
            submission_id = %message.submission_id(),
            attachment_count = ids.len(),
            "Custody agreements retained"
        );

        Ok(ids)
    }

    /// Best-effort rollback of retained attachments after a failed publish.
    /// A cleanup failure is logged with everything needed for manual
    /// reconciliation and never masks the publish failure.
    async fn compensate(
        &self,
        record: &CompletedRecord,
        retained: &[AttachmentId],
        correlation_id: &CorrelationId,
    ) {
        if retained.is_empty() {
            return;
        }

        COMPENSATING_DELETES_TOTAL.inc();
        let owner = DocumentOwner::new(&record.applicant.national_id);

        if let Err(cleanup_err) = self
            .attachments
            .delete_all(retained, &owner, correlation_id)
            .await
        {
            error!(
                submission_id = %record.submission_id(),
                attachment_ids = ?retained,
                error = %cleanup_err,
                "Compensating delete failed, attachments need manual reconciliation"
            );
        } else {
            info!(
                submission_id = %record.submission_id(),
                attachment_count = retained.len(),
                "Retained attachments rolled back"
            );
        }
    }
}
