//! Shared owner of the user and alias directories.
//!
//! One [`Store`] is built at startup and handed to the services behind an
//! `Arc`. Each directory has its own lock. Code needing both takes users
//! first, then aliases, and never holds a guard across an `.await`.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{AliasDirectory, UserDirectory};

/// In-process state of the application. Dropped state is gone for good.
#[derive(Debug, Default)]
pub struct Store {
    users: RwLock<UserDirectory>,
    aliases: RwLock<AliasDirectory>,
}

impl Store {
    /// Create a store with empty directories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given directories.
    #[must_use]
    pub fn from_parts(users: UserDirectory, aliases: AliasDirectory) -> Self {
        Self {
            users: RwLock::new(users),
            aliases: RwLock::new(aliases),
        }
    }

    /// Shared access to the user directory.
    pub fn users(&self) -> RwLockReadGuard<'_, UserDirectory> {
        self.users.read()
    }

    /// Exclusive access to the user directory.
    pub fn users_mut(&self) -> RwLockWriteGuard<'_, UserDirectory> {
        self.users.write()
    }

    /// Shared access to the alias directory.
    pub fn aliases(&self) -> RwLockReadGuard<'_, AliasDirectory> {
        self.aliases.read()
    }

    /// Exclusive access to the alias directory.
    pub fn aliases_mut(&self) -> RwLockWriteGuard<'_, AliasDirectory> {
        self.aliases.write()
    }
}
