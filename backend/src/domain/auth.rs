//! Credentials submitted on registration and login.
//!
//! Inbound adapters hand raw form fields to [`Credentials::try_from_parts`]
//! so the services only ever see trimmed, non-empty values.

use zeroize::Zeroizing;

use super::Email;
use super::access::ValidationFailure;

/// Trimmed, non-empty email and password pair.
///
/// # Examples
/// ```
/// use tinylink::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("  a@a.com ", " pass ").unwrap();
/// assert_eq!(creds.email().as_str(), "a@a.com");
/// assert_eq!(creds.password(), "pass");
/// ```
#[derive(Clone)]
pub struct Credentials {
    email: Email,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Trim both inputs and reject empty values.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, ValidationFailure> {
        let email = Email::new(email.trim()).map_err(|_| ValidationFailure::EmptyEmail)?;
        let password = password.trim();
        if password.is_empty() {
            return Err(ValidationFailure::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for lookups.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plain-text password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
