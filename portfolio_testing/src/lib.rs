//! Stand-ins for external services, used by integration tests and for local
//! development without real credentials.

pub mod resend;
