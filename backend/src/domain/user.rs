//! User records and the identifiers that reference them.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier carried leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    InvalidId,
    /// The email was empty.
    #[error("email must not be empty")]
    EmptyEmail,
}

/// Opaque user identifier.
///
/// Identifiers may originate as numbers (fixtures, older clients) or strings
/// (session cookies). Both normalise to the same string form here, so two
/// `UserId`s compare equal exactly when they name the same user.
///
/// # Examples
/// ```
/// use tinylink::domain::UserId;
///
/// assert_eq!(UserId::from(1_u64), UserId::new("1").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a fresh random identifier for a newly registered user.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Login email, compared exactly as entered.
///
/// No case folding or other normalisation is applied: `A@a.com` and
/// `a@a.com` are different accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Email(String);

impl Email {
    /// Construct an email, rejecting the empty string.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(email))
    }

    /// Borrow the email text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Salted one-way password hash in PHC string form.
///
/// Digests are deliberately not `PartialEq`: they may only be checked through
/// [`crate::domain::ports::CredentialHasher::verify`].
#[derive(Clone)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a PHC string produced by a credential hasher.
    #[must_use]
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Borrow the PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Registered user.
///
/// ## Invariants
/// - `email` is unique across the user directory.
/// - Records are created on registration and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    password_digest: PasswordDigest,
}

impl User {
    /// Build a user from validated parts.
    #[must_use]
    pub fn new(id: UserId, email: Email, password_digest: PasswordDigest) -> Self {
        Self {
            id,
            email,
            password_digest,
        }
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored password digest.
    #[must_use]
    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    /// Public view of the user, safe to hand to clients.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
        }
    }
}

/// Client-facing user view without credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[schema(value_type = String, example = "1")]
    id: UserId,
    #[schema(value_type = String, example = "a@a.com")]
    email: Email,
}

impl UserProfile {
    /// Identifier of the profiled user.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Email of the profiled user.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }
}
