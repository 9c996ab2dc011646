//! Access control core: who may see, resolve, change or delete which alias.
//!
//! Everything here is a pure function over borrowed directories. Callers take
//! the store locks, call in, and map the resulting [`AccessError`] to their
//! transport exactly once. Nothing in this module logs.

use std::collections::BTreeMap;

use super::ports::{AliasKeySource, CredentialHasher};
use super::{AliasDirectory, AliasKey, AliasRecord, Credentials, User, UserDirectory, UserId};

/// Attempts made to find an unused alias key before giving up.
pub const MAX_KEY_ATTEMPTS: usize = 16;

/// Why registration or login input was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank once trimmed.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Another user already registered this email.
    #[error("this email already exists")]
    EmailTaken,
    /// Email and password did not match a registered user.
    #[error("email or password is incorrect")]
    InvalidCredentials,
}

/// Outcome of a refused access decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The alias (or user) does not exist.
    #[error("page not found")]
    NotFound,
    /// The caller is logged in but does not own the alias.
    #[error("access denied")]
    Forbidden,
    /// The operation needs a logged-in caller.
    #[error("please login or register to have access")]
    Unauthenticated,
    /// Registration or login input was refused.
    #[error(transparent)]
    ValidationFailed(#[from] ValidationFailure),
    /// No free alias key turned up within the attempt budget.
    #[error("no unused alias key found after {attempts} attempts")]
    KeySpaceExhausted {
        /// Number of keys tried.
        attempts: usize,
    },
}

/// Who is asking.
#[derive(Debug, Clone)]
pub enum Identity {
    /// No session, or a session naming no known user.
    Anonymous,
    /// A session resolving to a registered user.
    Authenticated(User),
}

impl Identity {
    /// The caller's user id, if logged in.
    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.user().map(User::id)
    }

    /// The caller's user record, if logged in.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    /// Whether the caller is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    fn require_user_id(&self) -> Result<&UserId, AccessError> {
        self.user_id().ok_or(AccessError::Unauthenticated)
    }
}

/// Resolve a session's user id against the user directory.
///
/// A stale or forged id that names no user resolves to
/// [`Identity::Anonymous`] rather than an error.
#[must_use]
pub fn resolve_user(session_id: Option<&UserId>, users: &UserDirectory) -> Identity {
    session_id
        .and_then(|id| users.get(id))
        .map_or(Identity::Anonymous, |user| Identity::Authenticated(user.clone()))
}

/// Whether the session id names a registered user.
#[must_use]
pub fn is_logged_in(session_id: Option<&UserId>, users: &UserDirectory) -> bool {
    session_id.is_some_and(|id| users.get(id).is_some())
}

/// Check an email and password against the user directory.
///
/// True iff some user has exactly this email and the password validates
/// against that user's digest. Empty inputs never verify, and a digest the
/// hasher cannot parse counts as a mismatch.
pub fn verify(
    email: &str,
    password: &str,
    users: &UserDirectory,
    hasher: &dyn CredentialHasher,
) -> bool {
    if email.is_empty() || password.is_empty() {
        return false;
    }
    users
        .iter()
        .filter(|user| user.email().as_str() == email)
        .any(|user| matches!(hasher.verify(password, user.password_digest()), Ok(true)))
}

/// Refuse registration when the email is already taken.
pub fn check_registration(
    credentials: &Credentials,
    users: &UserDirectory,
) -> Result<(), AccessError> {
    if users.contains_email(credentials.email().as_str()) {
        return Err(ValidationFailure::EmailTaken.into());
    }
    Ok(())
}

/// Whether `alias` exists and is owned by `user`.
#[must_use]
pub fn is_owner(alias: &AliasKey, user: &UserId, aliases: &AliasDirectory) -> bool {
    aliases
        .get(alias)
        .is_some_and(|record| record.owner() == user)
}

/// Every alias owned by `user`.
#[must_use]
pub fn owned_by(user: &UserId, aliases: &AliasDirectory) -> BTreeMap<AliasKey, AliasRecord> {
    aliases
        .iter()
        .filter(|(_, record)| record.owner() == user)
        .map(|(key, record)| (key.clone(), record.clone()))
        .collect()
}

/// Aliases the caller may see: its own, or nothing when anonymous.
#[must_use]
pub fn visible_aliases(
    identity: &Identity,
    aliases: &AliasDirectory,
) -> BTreeMap<AliasKey, AliasRecord> {
    identity
        .user_id()
        .map(|user| owned_by(user, aliases))
        .unwrap_or_default()
}

/// Whether `alias` can be followed. Public: existence is all that matters.
#[must_use]
pub fn can_resolve(alias: &AliasKey, aliases: &AliasDirectory) -> bool {
    aliases.contains(alias)
}

/// Alias listing for a logged-in caller.
pub fn list(
    identity: &Identity,
    aliases: &AliasDirectory,
) -> Result<BTreeMap<AliasKey, AliasRecord>, AccessError> {
    identity.require_user_id()?;
    Ok(visible_aliases(identity, aliases))
}

/// Store a new alias for the caller under a fresh key.
pub fn create(
    owner: &Identity,
    target_url: String,
    aliases: &mut AliasDirectory,
    keys: &dyn AliasKeySource,
) -> Result<AliasKey, AccessError> {
    let owner = owner.require_user_id()?;
    let key = (0..MAX_KEY_ATTEMPTS)
        .map(|_| keys.next_key())
        .find(|candidate| !aliases.contains(candidate))
        .ok_or(AccessError::KeySpaceExhausted {
            attempts: MAX_KEY_ATTEMPTS,
        })?;
    aliases.insert(key.clone(), AliasRecord::new(owner.clone(), target_url));
    Ok(key)
}

/// The caller's own alias record.
///
/// Existence is checked before login so a missing alias reads as not found
/// for everybody.
pub fn show(
    alias: &AliasKey,
    caller: &Identity,
    aliases: &AliasDirectory,
) -> Result<AliasRecord, AccessError> {
    let record = aliases.get(alias).ok_or(AccessError::NotFound)?;
    let caller = caller.require_user_id()?;
    if record.owner() != caller {
        return Err(AccessError::Forbidden);
    }
    Ok(record.clone())
}

fn authorize_owner<'a>(
    alias: &AliasKey,
    caller: &'a Identity,
    aliases: &AliasDirectory,
) -> Result<&'a UserId, AccessError> {
    let caller = caller.require_user_id()?;
    let record = aliases.get(alias).ok_or(AccessError::NotFound)?;
    if record.owner() != caller {
        return Err(AccessError::Forbidden);
    }
    Ok(caller)
}

/// Point the caller's alias at a new target.
///
/// The owner is rewritten to the caller as well, which is a no-op for a
/// successful ownership check.
pub fn update(
    alias: &AliasKey,
    caller: &Identity,
    new_target_url: String,
    aliases: &mut AliasDirectory,
) -> Result<(), AccessError> {
    let owner = authorize_owner(alias, caller, aliases)?.clone();
    let record = aliases.get_mut(alias).ok_or(AccessError::NotFound)?;
    record.retarget(owner, new_target_url);
    Ok(())
}

/// Remove the caller's alias.
pub fn delete(
    alias: &AliasKey,
    caller: &Identity,
    aliases: &mut AliasDirectory,
) -> Result<AliasRecord, AccessError> {
    authorize_owner(alias, caller, aliases)?;
    aliases.remove(alias).ok_or(AccessError::NotFound)
}

/// Target of `alias`, for anybody.
pub fn resolve(alias: &AliasKey, aliases: &AliasDirectory) -> Result<String, AccessError> {
    aliases
        .get(alias)
        .map(|record| record.target_url().to_owned())
        .ok_or(AccessError::NotFound)
}
