//! Outbound adapters implementing the domain's driven ports.
//!
//! - **security**: Argon2id password hashing behind `CredentialHasher`.
//! - **alias_keys**: random alias keys behind `AliasKeySource`.
//!
//! Adapters translate between library types and domain types and hold no
//! access rules of their own.

pub mod alias_keys;
pub mod security;

pub use alias_keys::RandomAliasKeys;
pub use security::Argon2Hasher;
