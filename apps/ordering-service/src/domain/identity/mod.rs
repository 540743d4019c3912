//! Identity Bounded Context
//!
//! Admin accounts and the principal produced by credential verification.

pub mod admin_account;
pub mod errors;
pub mod principal;
pub mod repository;

pub use admin_account::AdminAccount;
pub use errors::AuthError;
pub use principal::{Principal, Role};
pub use repository::AdminRepository;
