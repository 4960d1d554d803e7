// ============================================================================
// Careday Submission Service
// ============================================================================
//
// Accepts citizen-submitted messages about transferring or redistributing
// care-day entitlements, validates them, enriches them from the identity/
// relationship lookup service, retains referenced attachments in the remote
// store, and publishes one completed record per accepted submission to the
// durable Kafka log. Publish failures after attachment retention trigger a
// compensating delete of everything retained.
//
// ============================================================================

use std::sync::Arc;

use careday_config::Config;

pub mod attachments;
pub mod auth;
pub mod clients;
pub mod draft;
pub mod kafka;
pub mod message;
pub mod routes;
pub mod submission;

use attachments::client::AttachmentStore;
use clients::applicant::ApplicantResolver;
use clients::children::ChildrenLookup;
use draft::DraftStore;
use submission::service::SubmissionService;

/// Shared state handed to every request handler.
pub struct AppContext {
    pub config: Arc<Config>,
    pub applicant: Arc<dyn ApplicantResolver>,
    pub children: Arc<dyn ChildrenLookup>,
    pub store: Arc<dyn AttachmentStore>,
    pub submissions: Arc<SubmissionService>,
    pub drafts: DraftStore,
}
