// ============================================================================
// Careday Types - Shared domain primitives
// ============================================================================
//
// Small, dependency-light types shared by every careday service crate:
// - National identifier checksum validation
// - Attachment ids extracted from store reference URLs
// - Correlation ids for cross-service tracing
// - Validation violations (accumulated, never thrown one at a time)
//
// ============================================================================

mod attachment_id;
mod correlation_id;
mod national_id;
mod violation;

pub use attachment_id::AttachmentId;
pub use correlation_id::CorrelationId;
pub use national_id::is_valid_national_identifier;
pub use violation::{Violation, Violations};
