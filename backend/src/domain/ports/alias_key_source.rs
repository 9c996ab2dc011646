//! Driven port producing candidate alias keys.

use crate::domain::AliasKey;

/// Source of fresh alias keys.
///
/// Keys are candidates only; the caller checks them against the directory and
/// asks again on collision.
#[cfg_attr(test, mockall::automock)]
pub trait AliasKeySource: Send + Sync {
    /// Produce the next candidate key.
    fn next_key(&self) -> AliasKey;
}
