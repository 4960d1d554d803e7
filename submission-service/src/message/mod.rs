// ============================================================================
// Message Domain Model
// ============================================================================

pub mod closure;
pub mod complete;
pub mod model;
pub mod validator;

pub use self::closure::ClosurePeriod;
pub use self::complete::{CompletedPayload, CompletedRecord, CompletedRedistribution};
pub use self::model::{
    ChildClaim, CoronaTransfer, Message, MessageCommon, RecipientRelation, Redistribution,
    SpouseTransfer, WorkSituation,
};

#[cfg(test)]
pub(crate) mod fixtures;
