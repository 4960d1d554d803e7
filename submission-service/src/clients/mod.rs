// ============================================================================
// Lookup Service Clients
// ============================================================================
//
// Clients for the identity/relationship lookup service. Requests pass the
// caller's own bearer token through; the lookup service answers for the
// authenticated citizen.
//
// ============================================================================

pub mod applicant;
pub mod children;
