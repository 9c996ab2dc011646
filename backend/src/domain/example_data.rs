//! Demo accounts and aliases for local runs.
//!
//! Seeding is opt-in at startup. It hashes the demo passwords with the
//! configured hasher, so seeded users log in exactly like registered ones.

use thiserror::Error;

use crate::domain::ports::{CredentialHashError, CredentialHasher};
use crate::domain::{
    AliasKey, AliasRecord, AliasValidationError, Email, Store, User, UserId, UserValidationError,
};

/// Demo users as `(id, email, password)`.
pub const EXAMPLE_USERS: [(u64, &str, &str); 2] = [(1, "a@a.com", "pass"), (2, "b@b.com", "pass2")];

/// Demo aliases as `(key, owner id, target url)`.
pub const EXAMPLE_ALIASES: [(&str, u64, &str); 3] = [
    ("b2xVn2", 1, "http://www.lighthouselabs.ca"),
    ("9sm5xK", 1, "http://www.google.com"),
    ("d34565", 2, "http://www.google.com"),
];

/// How much of the demo data was new to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleDataSeedOutcome {
    /// Users inserted by this run.
    pub users_added: usize,
    /// Aliases inserted by this run.
    pub aliases_added: usize,
}

/// Errors raised while preparing the demo data.
#[derive(Debug, Error)]
pub enum ExampleDataSeedingError {
    /// A demo password could not be hashed.
    #[error("hashing demo password failed: {0}")]
    Hashing(#[from] CredentialHashError),
    /// A demo user failed validation.
    #[error("demo user failed validation: {0}")]
    InvalidUser(#[from] UserValidationError),
    /// A demo alias key failed validation.
    #[error("demo alias failed validation: {0}")]
    InvalidAlias(#[from] AliasValidationError),
}

/// Insert the demo users and aliases that are not already present.
///
/// Users are matched by email and aliases by key, so running twice adds
/// nothing the second time.
///
/// # Errors
///
/// Returns [`ExampleDataSeedingError`] if hashing or validation fails. The
/// store is left untouched in that case.
pub fn seed_example_data(
    store: &Store,
    hasher: &dyn CredentialHasher,
) -> Result<ExampleDataSeedOutcome, ExampleDataSeedingError> {
    let mut users = Vec::with_capacity(EXAMPLE_USERS.len());
    for (id, email, password) in EXAMPLE_USERS {
        let email = Email::new(email)?;
        users.push(User::new(UserId::from(id), email, hasher.hash(password)?));
    }
    let mut aliases = Vec::with_capacity(EXAMPLE_ALIASES.len());
    for (key, owner, target) in EXAMPLE_ALIASES {
        aliases.push((AliasKey::new(key)?, AliasRecord::new(UserId::from(owner), target)));
    }

    let mut outcome = ExampleDataSeedOutcome {
        users_added: 0,
        aliases_added: 0,
    };
    let mut directory = store.users_mut();
    for user in users {
        if !directory.contains_email(user.email().as_str()) && directory.get(user.id()).is_none() {
            directory.insert(user);
            outcome.users_added += 1;
        }
    }
    let mut alias_directory = store.aliases_mut();
    for (key, record) in aliases {
        if !alias_directory.contains(&key) {
            alias_directory.insert(key, record);
            outcome.aliases_added += 1;
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    //! Unit tests for demo data seeding.

    use super::*;
    use crate::domain::access;
    use crate::domain::ports::MockCredentialHasher;
    use crate::domain::{Identity, PasswordDigest};
    use crate::outbound::security::Argon2Hasher;

    #[test]
    fn seeds_demo_users_and_aliases() {
        let store = Store::new();
        let hasher = Argon2Hasher::with_cost(8, 1, 1).expect("cheap test parameters");

        let outcome = seed_example_data(&store, &hasher).expect("seed succeeds");

        assert_eq!(
            outcome,
            ExampleDataSeedOutcome {
                users_added: 2,
                aliases_added: 3
            }
        );
        assert!(access::verify("a@a.com", "pass", &store.users(), &hasher));
        assert!(access::verify("b@b.com", "pass2", &store.users(), &hasher));

        let first = access::resolve_user(Some(&UserId::from(1)), &store.users());
        let owned = access::visible_aliases(&first, &store.aliases());
        assert_eq!(owned.len(), 2);
        assert!(matches!(first, Identity::Authenticated(_)));
    }

    #[test]
    fn second_run_adds_nothing() {
        let store = Store::new();
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Ok(PasswordDigest::new("$fake$digest")));

        seed_example_data(&store, &hasher).expect("first seed");
        let outcome = seed_example_data(&store, &hasher).expect("second seed");

        assert_eq!(outcome.users_added, 0);
        assert_eq!(outcome.aliases_added, 0);
        assert_eq!(store.users().len(), 2);
        assert_eq!(store.aliases().len(), 3);
    }

    #[test]
    fn hashing_failure_leaves_store_empty() {
        let store = Store::new();
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Err(CredentialHashError::hashing("out of memory")));

        let err = seed_example_data(&store, &hasher).expect_err("seed fails");

        assert!(matches!(err, ExampleDataSeedingError::Hashing(_)));
        assert!(store.users().is_empty());
        assert!(store.aliases().is_empty());
    }
}
