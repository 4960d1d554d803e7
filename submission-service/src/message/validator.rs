// ============================================================================
// Message Validator
// ============================================================================
//
// Structural and business-rule validation of submitted messages. Every check
// runs unconditionally and appends to one violation set; accept/reject is
// decided only after the full pass, so the caller can correct all fields in
// a single resubmission.
//
// ============================================================================

use careday_config::MAX_TOTAL_ATTACHMENT_BYTES;
use careday_error::AppError;
use careday_types::{is_valid_national_identifier, Violation, Violations};
use serde_json::json;

use super::closure::is_recognized_closure_period;
use super::model::{
    ChildClaim, CoronaTransfer, Message, MessageCommon, RecipientRelation, Redistribution,
    SpouseTransfer,
};
use crate::attachments::Attachment;

pub const MIN_TRANSFER_DAYS: i32 = 1;
pub const MAX_TRANSFER_DAYS: i32 = 10;
pub const MAX_CORONA_TRANSFER_DAYS: i32 = 999;

/// Validate a message, returning either nothing or the complete set of
/// violations as one error value.
pub fn validate(message: &Message) -> Result<(), Violations> {
    let mut violations = Violations::new();

    validate_common(message.common(), &mut violations);

    match message {
        Message::CoronaTransfer { corona, .. } => validate_corona(corona, &mut violations),
        Message::SpouseTransfer { transfer, .. } => validate_transfer(transfer, &mut violations),
        Message::Redistribution { redistribution, .. } => {
            validate_redistribution(redistribution, &mut violations)
        }
    }

    violations.into_result()
}

fn validate_common(common: &MessageCommon, violations: &mut Violations) {
    if !common.has_confirmed_details {
        violations.push(Violation::new(
            "hasConfirmedDetails",
            "details must be confirmed before a message can be submitted",
            json!(common.has_confirmed_details),
        ));
    }

    if !common.has_understood_rights_and_duties {
        violations.push(Violation::new(
            "hasUnderstoodRightsAndDuties",
            "rights and duties must be understood before a message can be submitted",
            json!(common.has_understood_rights_and_duties),
        ));
    }

    if common.recipient_name.trim().is_empty() {
        violations.push(Violation::new(
            "recipientName",
            "recipientName must not be empty or blank",
            json!(common.recipient_name),
        ));
    }

    if !is_valid_national_identifier(&common.recipient_national_id) {
        violations.push(Violation::new(
            "recipientNationalId",
            "recipientNationalId must be a valid national identifier",
            json!(common.recipient_national_id),
        ));
    }

    if common.work_situation.is_empty() {
        violations.push(Violation::new(
            "workSituation",
            "workSituation must not be an empty list",
            json!([]),
        ));
    }

    if common.children.is_empty() {
        violations.push(Violation::new(
            "children",
            "children must not be an empty list",
            json!([]),
        ));
    }

    for (index, child) in common.children.iter().enumerate() {
        validate_child(child, index, violations);
    }
}

fn validate_child(child: &ChildClaim, index: usize, violations: &mut Violations) {
    match child.national_id.as_deref() {
        None => violations.push(Violation::new(
            format!("children[{}].nationalId", index),
            "the child's national identifier must be present",
            json!(null),
        )),
        Some(national_id) if !is_valid_national_identifier(national_id) => {
            violations.push(Violation::new(
                format!("children[{}].nationalId", index),
                "the child's national identifier must be valid",
                json!(national_id),
            ));
        }
        Some(_) => {}
    }

    if child.name.trim().is_empty() {
        violations.push(Violation::new(
            format!("children[{}].name", index),
            "the child's name must not be empty or blank",
            json!(child.name),
        ));
    }

    if child.sole_custody.is_none() {
        violations.push(Violation::new(
            format!("children[{}].soleCustody", index),
            "soleCustody must be answered",
            json!(null),
        ));
    }

    if child.extended_right.is_none() {
        violations.push(Violation::new(
            format!("children[{}].extendedRight", index),
            "extendedRight must be answered",
            json!(null),
        ));
    }
}

fn validate_corona(corona: &CoronaTransfer, violations: &mut Violations) {
    if !(MIN_TRANSFER_DAYS..=MAX_CORONA_TRANSFER_DAYS).contains(&corona.days_to_transfer) {
        violations.push(Violation::new(
            "corona.daysToTransfer",
            format!(
                "daysToTransfer must be between {} and {}",
                MIN_TRANSFER_DAYS, MAX_CORONA_TRANSFER_DAYS
            ),
            json!(corona.days_to_transfer),
        ));
    }

    if !is_recognized_closure_period(&corona.closure_period) {
        violations.push(Violation::new(
            "corona.closurePeriod",
            "closurePeriod must match a recognized closure period",
            json!(corona.closure_period),
        ));
    }
}

fn validate_transfer(transfer: &SpouseTransfer, violations: &mut Violations) {
    if !(MIN_TRANSFER_DAYS..=MAX_TRANSFER_DAYS).contains(&transfer.days_to_transfer) {
        violations.push(Violation::new(
            "transfer.daysToTransfer",
            format!(
                "daysToTransfer must be between {} and {}",
                MIN_TRANSFER_DAYS, MAX_TRANSFER_DAYS
            ),
            json!(transfer.days_to_transfer),
        ));
    }

    if transfer.recipient_relation == RecipientRelation::CoParent {
        violations.push(Violation::new(
            "transfer.recipientRelation",
            "recipientRelation must be spouse or cohabitant",
            json!(transfer.recipient_relation),
        ));
    }
}

fn validate_redistribution(redistribution: &Redistribution, violations: &mut Violations) {
    if redistribution.recipient_relation != RecipientRelation::CoParent {
        violations.push(Violation::new(
            "redistribution.recipientRelation",
            "recipientRelation must be coParent",
            json!(redistribution.recipient_relation),
        ));
    }
}

/// Completeness check for redistribution attachments: every referenced
/// attachment must have been retrievable, and the combined size must stay
/// under the cap. Distinct from field validation — failures here are
/// terminal errors, not violations.
pub fn validate_attachments(attachments: &[Attachment], expected: usize) -> Result<(), AppError> {
    if attachments.len() != expected {
        return Err(AppError::AttachmentIncomplete {
            expected,
            found: attachments.len(),
        });
    }

    let total_bytes: usize = attachments.iter().map(|a| a.content.len()).sum();
    if total_bytes > MAX_TOTAL_ATTACHMENT_BYTES {
        return Err(AppError::AttachmentTooLarge {
            total_bytes,
            max_bytes: MAX_TOTAL_ATTACHMENT_BYTES,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::DocumentOwner;
    use crate::message::fixtures;

    #[test]
    fn valid_messages_pass() {
        assert!(validate(&fixtures::valid_corona_transfer()).is_ok());
        assert!(validate(&fixtures::valid_spouse_transfer()).is_ok());
        assert!(validate(&fixtures::valid_redistribution()).is_ok());
    }

    #[test]
    fn every_failed_check_is_reported_together() {
        // Five independent problems: both consents, blank recipient name,
        // invalid recipient id, empty work situation.
        let mut message = fixtures::valid_spouse_transfer();
        if let Message::SpouseTransfer { common, .. } = &mut message {
            common.has_confirmed_details = false;
            common.has_understood_rights_and_duties = false;
            common.recipient_name = "  ".to_string();
            common.recipient_national_id = "12345678901".to_string();
            common.work_situation.clear();
        }

        let violations = validate(&message).unwrap_err();
        assert_eq!(violations.len(), 5);
    }

    #[test]
    fn child_checks_are_indexed_per_child() {
        let mut message = fixtures::valid_corona_transfer();
        if let Message::CoronaTransfer { common, .. } = &mut message {
            common.children.push(ChildClaim {
                actor_id: Some("child-actor-2".to_string()),
                national_id: None,
                name: "".to_string(),
                birth_date: chrono::NaiveDate::from_ymd_opt(2018, 4, 2).unwrap(),
                sole_custody: None,
                extended_right: None,
            });
        }

        let violations = validate(&message).unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "children[1].nationalId",
                "children[1].name",
                "children[1].soleCustody",
                "children[1].extendedRight",
            ]
        );
    }

    #[test]
    fn empty_children_list_is_rejected() {
        let mut message = fixtures::valid_corona_transfer();
        if let Message::CoronaTransfer { common, .. } = &mut message {
            common.children.clear();
        }
        let violations = validate(&message).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.iter().next().unwrap().field, "children");
    }

    #[test]
    fn corona_transfer_rejects_unrecognized_closure_period() {
        let mut message = fixtures::valid_corona_transfer();
        if let Message::CoronaTransfer { corona, .. } = &mut message {
            corona.closure_period.to_date =
                chrono::NaiveDate::from_ymd_opt(2021, 6, 30).unwrap();
        }
        let violations = validate(&message).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations.iter().next().unwrap().field,
            "corona.closurePeriod"
        );
    }

    #[test]
    fn corona_transfer_rejects_zero_days() {
        let mut message = fixtures::valid_corona_transfer();
        if let Message::CoronaTransfer { corona, .. } = &mut message {
            corona.days_to_transfer = 0;
        }
        let violations = validate(&message).unwrap_err();
        assert_eq!(
            violations.iter().next().unwrap().field,
            "corona.daysToTransfer"
        );
    }

    #[test]
    fn spouse_transfer_rejects_co_parent_recipient() {
        let mut message = fixtures::valid_spouse_transfer();
        if let Message::SpouseTransfer { transfer, .. } = &mut message {
            transfer.recipient_relation = RecipientRelation::CoParent;
        }
        let violations = validate(&message).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations.iter().next().unwrap().field,
            "transfer.recipientRelation"
        );
    }

    #[test]
    fn spouse_transfer_rejects_eleven_days() {
        let mut message = fixtures::valid_spouse_transfer();
        if let Message::SpouseTransfer { transfer, .. } = &mut message {
            transfer.days_to_transfer = 11;
        }
        assert!(validate(&message).is_err());
    }

    #[test]
    fn redistribution_requires_co_parent_recipient() {
        let mut message = fixtures::valid_redistribution();
        if let Message::Redistribution { redistribution, .. } = &mut message {
            redistribution.recipient_relation = RecipientRelation::Spouse;
        }
        let violations = validate(&message).unwrap_err();
        assert_eq!(
            violations.iter().next().unwrap().field,
            "redistribution.recipientRelation"
        );
    }

    #[test]
    fn redistribution_without_references_is_valid() {
        let mut message = fixtures::valid_redistribution();
        if let Message::Redistribution { redistribution, .. } = &mut message {
            redistribution.custody_agreement_refs.clear();
        }
        assert!(validate(&message).is_ok());
    }

    fn attachment_of_size(bytes: usize) -> Attachment {
        Attachment {
            content: vec![0u8; bytes],
            content_type: "application/pdf".to_string(),
            title: "custody agreement".to_string(),
            owner: Some(DocumentOwner::new("25108500096")),
        }
    }

    #[test]
    fn attachment_count_mismatch_is_incomplete() {
        let err = validate_attachments(&[attachment_of_size(10)], 2).unwrap_err();
        assert!(matches!(
            err,
            AppError::AttachmentIncomplete {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn oversized_attachments_are_rejected_distinctly() {
        let attachments = [
            attachment_of_size(MAX_TOTAL_ATTACHMENT_BYTES / 2 + 1),
            attachment_of_size(MAX_TOTAL_ATTACHMENT_BYTES / 2 + 1),
        ];
        let err = validate_attachments(&attachments, 2).unwrap_err();
        assert!(matches!(err, AppError::AttachmentTooLarge { .. }));
    }

    #[test]
    fn complete_attachment_set_passes() {
        let attachments = [attachment_of_size(10), attachment_of_size(20)];
        assert!(validate_attachments(&attachments, 2).is_ok());
    }
}
