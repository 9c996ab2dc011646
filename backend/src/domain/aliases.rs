//! Alias service: list, create, show, update, delete and resolve.
//!
//! Each call takes exactly the lock it needs, hands the directory to the
//! access core, and converts the outcome into a domain [`Error`].

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::access;
use crate::domain::ports::{AliasKeySource, AliasService};
use crate::domain::{AliasKey, AliasRecord, Error, Identity, Store};

/// Alias service over the shared [`Store`].
pub struct AliasesService<K> {
    store: Arc<Store>,
    keys: Arc<K>,
}

impl<K> Clone for AliasesService<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            keys: Arc::clone(&self.keys),
        }
    }
}

impl<K> AliasesService<K> {
    /// Create a service over `store` drawing new keys from `keys`.
    pub fn new(store: Arc<Store>, keys: Arc<K>) -> Self {
        Self { store, keys }
    }
}

#[async_trait]
impl<K> AliasService for AliasesService<K>
where
    K: AliasKeySource + 'static,
{
    async fn list(&self, caller: &Identity) -> Result<BTreeMap<AliasKey, AliasRecord>, Error> {
        Ok(access::list(caller, &self.store.aliases())?)
    }

    async fn create(&self, caller: &Identity, target_url: String) -> Result<AliasKey, Error> {
        let key = access::create(
            caller,
            target_url,
            &mut self.store.aliases_mut(),
            &*self.keys,
        )?;
        if let Some(owner) = caller.user_id() {
            info!(alias = %key, owner = %owner, "alias created");
        }
        Ok(key)
    }

    async fn show(&self, caller: &Identity, alias: &AliasKey) -> Result<AliasRecord, Error> {
        Ok(access::show(alias, caller, &self.store.aliases())?)
    }

    async fn update(
        &self,
        caller: &Identity,
        alias: &AliasKey,
        new_target_url: String,
    ) -> Result<(), Error> {
        access::update(alias, caller, new_target_url, &mut self.store.aliases_mut())?;
        info!(alias = %alias, "alias retargeted");
        Ok(())
    }

    async fn delete(&self, caller: &Identity, alias: &AliasKey) -> Result<(), Error> {
        access::delete(alias, caller, &mut self.store.aliases_mut())?;
        info!(alias = %alias, "alias deleted");
        Ok(())
    }

    async fn resolve(&self, alias: &AliasKey) -> Result<String, Error> {
        let target = access::resolve(alias, &self.store.aliases())?;
        debug!(alias = %alias, "alias resolved");
        Ok(target)
    }
}
