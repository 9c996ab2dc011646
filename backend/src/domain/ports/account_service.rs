//! Driving port for registration, login and session identity.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, Identity, UserId};

/// Account use-cases consumed by inbound adapters.
///
/// Implementations never touch the session themselves: they decide, and the
/// adapter writes or clears the session afterwards.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user and return its id.
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error>;

    /// Check credentials and return the matching user's id.
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error>;

    /// Resolve the user id held by a session.
    fn identify(&self, session_id: Option<&UserId>) -> Identity;
}
