//! Driven port for salted password hashing.

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hashers.
    pub enum CredentialHashError {
        /// Producing a digest failed.
        Hashing { message } => "password hashing failed: {message}",
        /// A stored digest could not be parsed.
        MalformedDigest { message } => "stored password digest is malformed: {message}",
        /// Verification failed for a reason other than a wrong password.
        Verification { message } => "password verification failed: {message}",
        /// Configured cost parameters are out of range.
        InvalidParams { message } => "invalid password hashing parameters: {message}",
    }
}

/// One-way salted hash over passwords.
///
/// Both operations are CPU-bound; async callers should move them
/// onto a blocking thread.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    fn hash(&self, password: &str) -> Result<PasswordDigest, CredentialHashError>;

    /// Check `password` against `digest` in constant time.
    ///
    /// Returns `Ok(false)` for a wrong password and `Err` only when the digest
    /// itself is unusable.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, CredentialHashError>;
}
