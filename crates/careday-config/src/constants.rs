// ============================================================================
// Shared Constants
// ============================================================================

/// Maximum combined size of all attachments referenced by one submission.
pub const MAX_TOTAL_ATTACHMENT_BYTES: usize = 24 * 1024 * 1024;

/// Maximum size of a single uploaded attachment.
pub const MAX_ATTACHMENT_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Content types the attachment upload endpoint accepts.
pub const SUPPORTED_ATTACHMENT_CONTENT_TYPES: [&str; 3] =
    ["application/pdf", "image/jpeg", "image/png"];

pub const DEFAULT_PORT: u16 = 8080;

/// Drafts expire after three days unless resubmitted.
pub const DEFAULT_DRAFT_TTL_SECS: u64 = 72 * 60 * 60;
