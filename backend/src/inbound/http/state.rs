//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be exercised against any implementation.

use std::sync::Arc;

use crate::domain::ports::{AccountService, AliasKeySource, AliasService, CredentialHasher};
use crate::domain::{AccountsService, AliasesService, Identity, Store};
use crate::inbound::http::session::SessionContext;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, login and session identity.
    pub accounts: Arc<dyn AccountService>,
    /// Alias management and resolution.
    pub aliases: Arc<dyn AliasService>,
}

impl HttpState {
    /// Bundle already-built services.
    pub fn new(accounts: Arc<dyn AccountService>, aliases: Arc<dyn AliasService>) -> Self {
        Self { accounts, aliases }
    }

    /// Build the in-memory services over one shared [`Store`].
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use tinylink::domain::Store;
    /// use tinylink::inbound::http::state::HttpState;
    /// use tinylink::outbound::{Argon2Hasher, RandomAliasKeys};
    ///
    /// let state = HttpState::from_store(
    ///     Arc::new(Store::new()),
    ///     Arc::new(Argon2Hasher::default()),
    ///     Arc::new(RandomAliasKeys),
    /// );
    /// let _ = state.accounts.identify(None);
    /// ```
    pub fn from_store<H, K>(store: Arc<Store>, hasher: Arc<H>, keys: Arc<K>) -> Self
    where
        H: CredentialHasher + 'static,
        K: AliasKeySource + 'static,
    {
        Self {
            accounts: Arc::new(AccountsService::new(Arc::clone(&store), hasher)),
            aliases: Arc::new(AliasesService::new(store, keys)),
        }
    }

    /// Who the session belongs to.
    pub fn identify(&self, session: &SessionContext) -> Identity {
        self.accounts.identify(session.user_id().as_ref())
    }
}
