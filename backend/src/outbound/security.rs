//! Argon2id credential hasher.
//!
//! Digests are PHC strings, so each one records its own salt and cost
//! parameters and stays verifiable after the configured costs change.

use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use password_hash::{PasswordHash, SaltString};

use crate::domain::PasswordDigest;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

const SALT_LEN: usize = 16;

/// [`CredentialHasher`] backed by Argon2id.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2Hasher {
    /// Build a hasher with explicit memory (KiB), iteration and lane costs.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialHashError::InvalidParams`] when Argon2 rejects the
    /// combination, for instance memory below eight blocks per lane.
    ///
    /// # Examples
    /// ```
    /// use tinylink::outbound::security::Argon2Hasher;
    ///
    /// assert!(Argon2Hasher::with_cost(19_456, 2, 1).is_ok());
    /// assert!(Argon2Hasher::with_cost(1, 1, 1).is_err());
    /// ```
    pub fn with_cost(
        memory_kib: u32,
        iterations: u32,
        lanes: u32,
    ) -> Result<Self, CredentialHashError> {
        let params = Params::new(memory_kib, iterations, lanes, None)
            .map_err(|err| CredentialHashError::invalid_params(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, CredentialHashError> {
        let mut salt_bytes = [0_u8; SALT_LEN];
        getrandom::getrandom(&mut salt_bytes)
            .map_err(|err| CredentialHashError::hashing(format!("salt generation: {err}")))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| CredentialHashError::hashing(format!("salt encoding: {err}")))?;
        let phc = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| CredentialHashError::hashing(err.to_string()))?;
        Ok(PasswordDigest::new(phc.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, CredentialHashError> {
        let parsed = PasswordHash::new(digest.as_str())
            .map_err(|err| CredentialHashError::malformed_digest(err.to_string()))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialHashError::verification(err.to_string())),
        }
    }
}
