//! Password hashing with Argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<digest>`):
//! algorithm, version, work factor and salt travel with the digest, so a stored
//! hash verifies on its own even after the configured work factor changes.

use crate::config::PasswordConfig;
use crate::error::{Result, SaveError};
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    /// Argon2 default work factor (19 MiB, 2 iterations, 1 lane).
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| SaveError::HashFailed(format!("invalid Argon2 parameters: {}", e)))?;
        Ok(Self { params })
    }

    pub fn from_config(config: &PasswordConfig) -> Result<Self> {
        Self::with_params(config.memory_kib, config.iterations, config.parallelism)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash with a fresh random salt; two calls on the same password differ.
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| SaveError::HashFailed(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// `Ok(false)` on mismatch. A hash that cannot be parsed or uses unsupported
    /// parameters is `MalformedHash`.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| SaveError::MalformedHash(e.to_string()))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(SaveError::MalformedHash(e.to_string())),
        }
    }
}
