//! Short aliases and the records they point at.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Number of characters in a generated alias key.
pub const ALIAS_KEY_LEN: usize = 6;

const ALIAS_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Validation errors returned by [`AliasKey::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasValidationError {
    /// The key was empty.
    #[error("alias must not be empty")]
    Empty,
}

/// Key of an alias in the alias directory.
///
/// Keys taken from request paths are used verbatim; only the empty string is
/// rejected. Generated keys are [`ALIAS_KEY_LEN`] characters of `[0-9a-z]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AliasKey(String);

impl AliasKey {
    /// Validate and construct an alias key.
    pub fn new(key: impl Into<String>) -> Result<Self, AliasValidationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(AliasValidationError::Empty);
        }
        Ok(Self(key))
    }

    /// Draw a random key from `rng`.
    ///
    /// # Examples
    /// ```
    /// use tinylink::domain::{AliasKey, ALIAS_KEY_LEN};
    ///
    /// let key = AliasKey::random(&mut rand::thread_rng());
    /// assert_eq!(key.as_str().len(), ALIAS_KEY_LEN);
    /// ```
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let key = (0..ALIAS_KEY_LEN)
            .filter_map(|_| ALIAS_ALPHABET.choose(rng))
            .map(|&byte| char::from(byte))
            .collect();
        Self(key)
    }

    /// Borrow the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AliasKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AliasKey> for String {
    fn from(value: AliasKey) -> Self {
        value.0
    }
}

impl TryFrom<String> for AliasKey {
    type Error = AliasValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Alias record stored under an [`AliasKey`].
///
/// `owner` refers to a user by value only. A record whose owner no longer
/// resolves is kept as-is and is simply visible to nobody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AliasRecord {
    #[serde(rename = "userID")]
    #[schema(value_type = String, example = "1")]
    owner: UserId,
    #[serde(rename = "longURL")]
    #[schema(example = "http://www.lighthouselabs.ca")]
    target_url: String,
}

impl AliasRecord {
    /// Build a record owned by `owner`.
    #[must_use]
    pub fn new(owner: UserId, target_url: impl Into<String>) -> Self {
        Self {
            owner,
            target_url: target_url.into(),
        }
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Target URL. Never validated.
    #[must_use]
    pub fn target_url(&self) -> &str {
        self.target_url.as_str()
    }

    pub(crate) fn retarget(&mut self, owner: UserId, target_url: String) {
        self.owner = owner;
        self.target_url = target_url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(AliasKey::new("").expect_err("empty"), AliasValidationError::Empty);
    }

    #[test]
    fn path_keys_are_kept_verbatim() {
        let key = AliasKey::new("9sm5xK").expect("key");
        assert_eq!(key.as_str(), "9sm5xK");
    }

    #[test]
    fn random_keys_use_lowercase_base36() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..64 {
            let key = AliasKey::random(&mut rng);
            assert_eq!(key.as_str().len(), ALIAS_KEY_LEN);
            assert!(
                key.as_str()
                    .bytes()
                    .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
            );
        }
    }

    #[test]
    fn record_uses_camel_url_field_names() {
        let record = AliasRecord::new(UserId::from(1), "http://a.ca");
        let value = serde_json::to_value(&record).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({ "userID": "1", "longURL": "http://a.ca" })
        );
    }
}
