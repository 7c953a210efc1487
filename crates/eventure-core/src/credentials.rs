use anyhow::{Result, anyhow};
use argon2::{
    Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

/// Salted, non-reversible password storage. The core only ever hands the
/// plaintext to this trait and keeps the opaque result.
pub trait CredentialStore: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;

    /// `false` for a wrong password and for a hash that cannot be parsed.
    fn verify(&self, hash: &str, password: &str) -> bool;
}

/// Argon2id with a fresh random salt per hash.
#[derive(Default)]
pub struct Argon2Credentials {
    argon2: Argon2<'static>,
}

impl Argon2Credentials {
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }
}

impl CredentialStore for Argon2Credentials {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("Password hashing failed: {}", e))?;
        Ok(hash.to_string())
    }

    fn verify(&self, hash: &str, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
