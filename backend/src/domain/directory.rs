//! The two in-memory tables backing the application.

use std::collections::HashMap;

use super::{AliasKey, AliasRecord, User, UserId};

/// User identifier to user record.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<UserId, User>,
}

impl UserDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user, keyed by its id.
    pub fn insert(&mut self, user: User) -> Option<User> {
        self.users.insert(user.id().clone(), user)
    }

    /// Look a user up by id.
    #[must_use]
    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Look a user up by exact email.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|user| user.email().as_str() == email)
    }

    /// Whether any user registered `email`.
    #[must_use]
    pub fn contains_email(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    /// Copy of the entries registered under `email`.
    ///
    /// Lets callers verify a password without holding a lock on the shared
    /// directory while the hash runs.
    #[must_use]
    pub fn matching_email(&self, email: &str) -> Self {
        self.users
            .values()
            .filter(|user| user.email().as_str() == email)
            .cloned()
            .collect()
    }

    /// Iterate over all users.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no user is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl FromIterator<User> for UserDirectory {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let mut directory = Self::new();
        for user in iter {
            directory.insert(user);
        }
        directory
    }
}

/// Alias key to alias record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasDirectory {
    aliases: HashMap<AliasKey, AliasRecord>,
}

impl AliasDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record stored under `key`.
    pub fn insert(&mut self, key: AliasKey, record: AliasRecord) -> Option<AliasRecord> {
        self.aliases.insert(key, record)
    }

    /// Look an alias up.
    #[must_use]
    pub fn get(&self, key: &AliasKey) -> Option<&AliasRecord> {
        self.aliases.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &AliasKey) -> Option<&mut AliasRecord> {
        self.aliases.get_mut(key)
    }

    /// Remove an alias, returning its record.
    pub fn remove(&mut self, key: &AliasKey) -> Option<AliasRecord> {
        self.aliases.remove(key)
    }

    /// Whether `key` is taken.
    #[must_use]
    pub fn contains(&self, key: &AliasKey) -> bool {
        self.aliases.contains_key(key)
    }

    /// Iterate over all aliases.
    pub fn iter(&self) -> impl Iterator<Item = (&AliasKey, &AliasRecord)> {
        self.aliases.iter()
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether the directory holds no alias.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl FromIterator<(AliasKey, AliasRecord)> for AliasDirectory {
    fn from_iter<I: IntoIterator<Item = (AliasKey, AliasRecord)>>(iter: I) -> Self {
        Self {
            aliases: iter.into_iter().collect(),
        }
    }
}
