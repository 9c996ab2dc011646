//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`AccountService`], [`AliasService`]) are what inbound
//! adapters call. Driven ports ([`CredentialHasher`], [`AliasKeySource`]) are
//! what the domain calls out to.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod alias_key_source;
mod alias_service;
mod credential_hasher;

pub use account_service::AccountService;
#[cfg(test)]
pub use alias_key_source::MockAliasKeySource;
pub use alias_key_source::AliasKeySource;
pub use alias_service::AliasService;
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
