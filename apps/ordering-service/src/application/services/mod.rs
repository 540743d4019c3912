//! Application Services
//!
//! Application services hold cross-request state or guard access to use
//! cases, as opposed to the single-operation use cases themselves.

mod admin_auth_gate;
mod idempotency;

pub use admin_auth_gate::AdminAuthGate;
pub use idempotency::IdempotencyCache;
