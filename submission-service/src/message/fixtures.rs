// ============================================================================
// Message Fixtures
// ============================================================================
//
// Known-good messages and identities shared by the unit tests. Every
// national identifier here is checksum-valid.
//
// ============================================================================

use chrono::NaiveDate;
use serde_json::{json, Value};
use url::Url;

use super::closure::ClosurePeriod;
use super::model::{
    ChildClaim, CoronaTransfer, Message, MessageCommon, RecipientRelation, Redistribution,
    SpouseTransfer, WorkSituation,
};
use crate::clients::applicant::ResolvedApplicant;

pub const APPLICANT_NATIONAL_ID: &str = "25108500096";
pub const UNDERAGE_NATIONAL_ID: &str = "05061000064";
pub const RECIPIENT_NATIONAL_ID: &str = "26104500284";
pub const CHILD_NATIONAL_ID: &str = "01012045014";
pub const ATTACHMENT_ID: &str = "custody-agreement-1";

pub fn adult_applicant() -> ResolvedApplicant {
    ResolvedApplicant {
        actor_id: "applicant-actor-1".to_string(),
        national_id: APPLICANT_NATIONAL_ID.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1985, 10, 25).unwrap(),
        first_name: "Ola".to_string(),
        middle_name: None,
        last_name: "Nordmann".to_string(),
    }
}

pub fn underage_applicant() -> ResolvedApplicant {
    ResolvedApplicant {
        actor_id: "applicant-actor-2".to_string(),
        national_id: UNDERAGE_NATIONAL_ID.to_string(),
        birth_date: NaiveDate::from_ymd_opt(2010, 6, 5).unwrap(),
        first_name: "Kari".to_string(),
        middle_name: Some("Mellom".to_string()),
        last_name: "Nordmann".to_string(),
    }
}

pub fn valid_child() -> ChildClaim {
    ChildClaim {
        actor_id: Some("child-actor-1".to_string()),
        national_id: Some(CHILD_NATIONAL_ID.to_string()),
        name: "Kjell Nordmann".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        sole_custody: Some(true),
        extended_right: Some(true),
    }
}

pub fn valid_common() -> MessageCommon {
    MessageCommon {
        submission_id: "2b1f1c2e-aaaa-bbbb-cccc-111122223333".to_string(),
        language: "nb".to_string(),
        has_understood_rights_and_duties: true,
        has_confirmed_details: true,
        recipient_name: "Berit Nordmann".to_string(),
        recipient_national_id: RECIPIENT_NATIONAL_ID.to_string(),
        work_situation: vec![WorkSituation::Employee, WorkSituation::SelfEmployed],
        children: vec![valid_child()],
    }
}

pub fn valid_corona_transfer() -> Message {
    Message::CoronaTransfer {
        common: valid_common(),
        corona: CoronaTransfer {
            days_to_transfer: 5,
            closure_period: ClosurePeriod {
                from_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                to_date: NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
            },
        },
    }
}

pub fn valid_spouse_transfer() -> Message {
    Message::SpouseTransfer {
        common: valid_common(),
        transfer: SpouseTransfer {
            recipient_relation: RecipientRelation::Spouse,
            days_to_transfer: 7,
        },
    }
}

pub fn valid_redistribution() -> Message {
    Message::Redistribution {
        common: valid_common(),
        redistribution: Redistribution {
            recipient_relation: RecipientRelation::CoParent,
            custody_agreement_refs: vec![attachment_ref(ATTACHMENT_ID)],
        },
    }
}

pub fn redistribution_with_child_missing_national_id() -> Message {
    let mut common = valid_common();
    common.children = vec![ChildClaim {
        national_id: None,
        ..valid_child()
    }];
    Message::Redistribution {
        common,
        redistribution: Redistribution {
            recipient_relation: RecipientRelation::CoParent,
            custody_agreement_refs: vec![],
        },
    }
}

pub fn attachment_ref(id: &str) -> Url {
    Url::parse(&format!("https://store.local/attachments/{}", id)).unwrap()
}

/// Raw corona-transfer JSON without a submission id, as a client would post it.
pub fn corona_transfer_json() -> Value {
    json!({
        "type": "coronaTransfer",
        "language": "nb",
        "hasUnderstoodRightsAndDuties": true,
        "hasConfirmedDetails": true,
        "recipientName": "Berit Nordmann",
        "recipientNationalId": RECIPIENT_NATIONAL_ID,
        "workSituation": ["employee"],
        "children": [{
            "actorId": "child-actor-1",
            "nationalId": CHILD_NATIONAL_ID,
            "name": "Kjell Nordmann",
            "birthDate": "2020-01-01",
            "soleCustody": true,
            "extendedRight": true
        }],
        "corona": {
            "daysToTransfer": 5,
            "closurePeriod": { "fromDate": "2021-01-01", "toDate": "2021-12-31" }
        }
    })
}
