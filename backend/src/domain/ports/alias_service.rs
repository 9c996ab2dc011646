//! Driving port for alias management and public resolution.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{AliasKey, AliasRecord, Error, Identity};

/// Alias use-cases consumed by inbound adapters.
#[async_trait]
pub trait AliasService: Send + Sync {
    /// Aliases owned by the caller.
    async fn list(&self, caller: &Identity) -> Result<BTreeMap<AliasKey, AliasRecord>, Error>;

    /// Shorten `target_url` on behalf of the caller.
    async fn create(&self, caller: &Identity, target_url: String) -> Result<AliasKey, Error>;

    /// One of the caller's aliases.
    async fn show(&self, caller: &Identity, alias: &AliasKey) -> Result<AliasRecord, Error>;

    /// Retarget one of the caller's aliases.
    async fn update(
        &self,
        caller: &Identity,
        alias: &AliasKey,
        new_target_url: String,
    ) -> Result<(), Error>;

    /// Delete one of the caller's aliases.
    async fn delete(&self, caller: &Identity, alias: &AliasKey) -> Result<(), Error>;

    /// Target URL of any existing alias.
    async fn resolve(&self, alias: &AliasKey) -> Result<String, Error>;
}
