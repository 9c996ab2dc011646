//! Account service: registration, login and session identity.
//!
//! Password hashing is CPU-bound, so both registration and login run the
//! hasher on tokio's blocking pool. Store guards are only ever held between
//! awaits, never across one.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::access::{self, ValidationFailure};
use crate::domain::ports::{AccountService, CredentialHashError, CredentialHasher};
use crate::domain::{Credentials, Error, Identity, PasswordDigest, Store, User, UserId};

/// Account service over the shared [`Store`].
pub struct AccountsService<H> {
    store: Arc<Store>,
    hasher: Arc<H>,
}

impl<H> Clone for AccountsService<H> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<H> AccountsService<H> {
    /// Create a service over `store` hashing with `hasher`.
    pub fn new(store: Arc<Store>, hasher: Arc<H>) -> Self {
        Self { store, hasher }
    }
}

fn map_hash_error(error: CredentialHashError) -> Error {
    Error::internal(format!("credential hashing failed: {error}"))
}

fn map_join_error(error: task::JoinError) -> Error {
    Error::internal(format!("credential hashing task failed: {error}"))
}

impl<H> AccountsService<H>
where
    H: CredentialHasher + 'static,
{
    async fn hash_password(&self, password: &str) -> Result<PasswordDigest, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(map_join_error)?
            .map_err(map_hash_error)
    }
}

#[async_trait]
impl<H> AccountService for AccountsService<H>
where
    H: CredentialHasher + 'static,
{
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error> {
        access::check_registration(credentials, &self.store.users())?;

        let digest = self.hash_password(credentials.password()).await?;
        let id = UserId::random();
        {
            // The email may have been taken while the hash was computed.
            let mut users = self.store.users_mut();
            access::check_registration(credentials, &users)?;
            users.insert(User::new(id.clone(), credentials.email().clone(), digest));
        }

        info!(user_id = %id, "user registered");
        Ok(id)
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let candidates = self
            .store
            .users()
            .matching_email(credentials.email().as_str());
        let hasher = Arc::clone(&self.hasher);
        let email = credentials.email().as_str().to_owned();
        let password = Zeroizing::new(credentials.password().to_owned());

        let matched = task::spawn_blocking(move || {
            access::verify(&email, &password, &candidates, &*hasher)
                .then(|| candidates.find_by_email(&email).map(|user| user.id().clone()))
                .flatten()
        })
        .await
        .map_err(map_join_error)?;

        match matched {
            Some(id) => {
                info!(user_id = %id, "user logged in");
                Ok(id)
            }
            None => {
                warn!("login rejected");
                Err(ValidationFailure::InvalidCredentials.into())
            }
        }
    }

    fn identify(&self, session_id: Option<&UserId>) -> Identity {
        access::resolve_user(session_id, &self.store.users())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the account service.

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCredentialHasher;
    use crate::outbound::security::Argon2Hasher;
    use rstest::{fixture, rstest};

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials::try_from_parts(email, password).expect("valid credentials")
    }

    #[fixture]
    fn service() -> AccountsService<Argon2Hasher> {
        let hasher = Argon2Hasher::with_cost(8, 1, 1).expect("cheap test parameters");
        AccountsService::new(Arc::new(Store::new()), Arc::new(hasher))
    }

    #[rstest]
    #[tokio::test]
    async fn registered_user_can_log_in(service: AccountsService<Argon2Hasher>) {
        let id = service
            .register(&credentials("c@c.com", "secret"))
            .await
            .expect("registration succeeds");

        let logged_in = service
            .authenticate(&credentials("c@c.com", "secret"))
            .await
            .expect("login succeeds");

        assert_eq!(logged_in, id);
        let identity = service.identify(Some(&id));
        assert_eq!(
            identity.user().map(|user| user.email().as_str()),
            Some("c@c.com")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn stored_digest_is_not_the_password(service: AccountsService<Argon2Hasher>) {
        let id = service
            .register(&credentials("c@c.com", "secret"))
            .await
            .expect("registration succeeds");

        let users = service.store.users();
        let digest = users.get(&id).expect("user stored").password_digest();
        assert_ne!(digest.as_str(), "secret");
        assert!(digest.as_str().starts_with("$argon2id$"));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_refused(service: AccountsService<Argon2Hasher>) {
        service
            .register(&credentials("c@c.com", "secret"))
            .await
            .expect("first registration");

        let err = service
            .register(&credentials("c@c.com", "other"))
            .await
            .expect_err("duplicate refused");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "this email already exists");
        assert_eq!(service.store.users().len(), 1);
    }

    #[rstest]
    #[case("c@c.com", "wrong")]
    #[case("nobody@c.com", "secret")]
    #[tokio::test]
    async fn bad_credentials_are_forbidden(
        service: AccountsService<Argon2Hasher>,
        #[case] email: &str,
        #[case] password: &str,
    ) {
        service
            .register(&credentials("c@c.com", "secret"))
            .await
            .expect("registration succeeds");

        let err = service
            .authenticate(&credentials(email, password))
            .await
            .expect_err("login refused");

        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), "email or password is incorrect");
    }

    #[rstest]
    fn unknown_session_is_anonymous(service: AccountsService<Argon2Hasher>) {
        assert!(!service.identify(Some(&UserId::from(99))).is_authenticated());
        assert!(!service.identify(None).is_authenticated());
    }

    #[tokio::test]
    async fn hashing_failure_is_internal_and_stores_nothing() {
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .returning(|_| Err(CredentialHashError::hashing("no memory")));
        let store = Arc::new(Store::new());
        let service = AccountsService::new(Arc::clone(&store), Arc::new(hasher));

        let err = service
            .register(&credentials("c@c.com", "secret"))
            .await
            .expect_err("hashing fails");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(store.users().is_empty());
    }
}
