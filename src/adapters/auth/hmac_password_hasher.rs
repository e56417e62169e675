//! HMAC-SHA256 password hasher.
//!
//! Hashes are keyed with a server-side pepper and salted per credential:
//! `hs256$<salt-hex>$<mac-hex>`. Verification recomputes the MAC and
//! compares in constant time.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "hs256";

/// Password hasher backed by HMAC-SHA256 with a configured pepper.
pub struct HmacPasswordHasher {
    pepper: SecretString,
}

impl HmacPasswordHasher {
    /// Creates a hasher keyed with the given pepper.
    pub fn new(pepper: SecretString) -> Self {
        Self { pepper }
    }

    fn mac(&self, salt: &[u8], plaintext: &SecretString) -> Result<Vec<u8>, DomainError> {
        let mut mac = HmacSha256::new_from_slice(self.pepper.expose_secret().as_bytes())
            .map_err(|e| {
                DomainError::new(ErrorCode::InternalError, format!("Invalid HMAC key: {}", e))
            })?;
        mac.update(salt);
        mac.update(plaintext.expose_secret().as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl PasswordHasher for HmacPasswordHasher {
    fn hash(&self, plaintext: &SecretString) -> Result<String, DomainError> {
        let salt = *Uuid::new_v4().as_bytes();
        let mac = self.mac(&salt, plaintext)?;
        Ok(format!(
            "{}${}${}",
            SCHEME,
            hex::encode(salt),
            hex::encode(mac)
        ))
    }

    fn verify(&self, plaintext: &SecretString, hash: &str) -> Result<bool, DomainError> {
        let mut parts = hash.split('$');
        let (scheme, salt_hex, mac_hex) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(scheme), Some(salt), Some(mac), None) => (scheme, salt, mac),
            _ => {
                return Err(DomainError::new(
                    ErrorCode::InternalError,
                    "Malformed password hash",
                ))
            }
        };
        if scheme != SCHEME {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Unknown password hash scheme: {}", scheme),
            ));
        }

        let salt = hex::decode(salt_hex).map_err(|_| {
            DomainError::new(ErrorCode::InternalError, "Malformed password hash salt")
        })?;
        let expected = hex::decode(mac_hex).map_err(|_| {
            DomainError::new(ErrorCode::InternalError, "Malformed password hash digest")
        })?;

        let actual = self.mac(&salt, plaintext)?;
        Ok(actual.ct_eq(&expected).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> HmacPasswordHasher {
        HmacPasswordHasher::new(SecretString::new("unit-test-pepper".to_string()))
    }

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    #[test]
    fn hash_then_verify_round_trips() {
        let hasher = hasher();
        let hash = hasher.hash(&secret("correct horse")).unwrap();

        assert!(hasher.verify(&secret("correct horse"), &hash).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hasher = hasher();
        let hash = hasher.hash(&secret("correct horse")).unwrap();

        assert!(!hasher.verify(&secret("battery staple"), &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = hasher();
        let a = hasher.hash(&secret("same password")).unwrap();
        let b = hasher.hash(&secret("same password")).unwrap();

        assert_ne!(a, b);
        assert!(hasher.verify(&secret("same password"), &a).unwrap());
        assert!(hasher.verify(&secret("same password"), &b).unwrap());
    }

    #[test]
    fn hash_does_not_contain_plaintext() {
        let hasher = hasher();
        let hash = hasher.hash(&secret("visible-password")).unwrap();
        assert!(!hash.contains("visible-password"));
    }

    #[test]
    fn different_pepper_fails_verification() {
        let hash = hasher().hash(&secret("correct horse")).unwrap();

        let other = HmacPasswordHasher::new(SecretString::new("other-pepper".to_string()));
        assert!(!other.verify(&secret("correct horse"), &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let hasher = hasher();
        assert!(hasher.verify(&secret("pw"), "not-a-hash").is_err());
        assert!(hasher.verify(&secret("pw"), "hs256$zz$zz").is_err());
        assert!(hasher
            .verify(&secret("pw"), "bcrypt$00$00")
            .is_err());
    }

    #[test]
    fn tampered_digest_fails_verification() {
        let hasher = hasher();
        let hash = hasher.hash(&secret("correct horse")).unwrap();
        let mut tampered = hash.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == '0' { '1' } else { '0' });

        assert!(!hasher.verify(&secret("correct horse"), &tampered).unwrap());
    }
}
