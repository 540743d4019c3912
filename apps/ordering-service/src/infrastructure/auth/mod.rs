//! Credential adapters: JWT signing and bcrypt password hashing.

mod jwt;
mod password;

pub use jwt::JwtTokenService;
pub use password::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
