//! Random alias key generation.

use rand::thread_rng;

use crate::domain::AliasKey;
use crate::domain::ports::AliasKeySource;

/// [`AliasKeySource`] drawing from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAliasKeys;

impl AliasKeySource for RandomAliasKeys {
    fn next_key(&self) -> AliasKey {
        AliasKey::random(&mut thread_rng())
    }
}
