//! Credential hashing adapters.

mod hmac_password_hasher;

pub use hmac_password_hasher::HmacPasswordHasher;
