//! Domain primitives, the access control core and the services built on it.
//!
//! Purpose: keep every ownership and login decision in one transport-free
//! place. Inbound adapters translate requests into calls on
//! [`ports::AccountService`] and [`ports::AliasService`]; outbound adapters
//! supply hashing and key generation through the driven ports.
//!
//! Public surface:
//! - [`User`], [`UserId`], [`Email`], [`PasswordDigest`]: account types.
//! - [`AliasKey`], [`AliasRecord`]: shortened URL types.
//! - [`Store`]: the shared in-memory directories.
//! - [`access`]: pure access decisions returning [`AccessError`].
//! - [`Error`], [`ErrorCode`]: transport-agnostic error payload.

pub mod access;
pub mod accounts;
pub mod alias;
pub mod aliases;
pub mod auth;
pub mod directory;
pub mod error;
pub mod example_data;
pub mod ports;
pub mod store;
pub mod trace_id;
pub mod user;

pub use self::access::{AccessError, Identity, MAX_KEY_ATTEMPTS, ValidationFailure};
pub use self::accounts::AccountsService;
pub use self::alias::{ALIAS_KEY_LEN, AliasKey, AliasRecord, AliasValidationError};
pub use self::aliases::AliasesService;
pub use self::auth::Credentials;
pub use self::directory::{AliasDirectory, UserDirectory};
pub use self::error::{Error, ErrorCode};
pub use self::example_data::{ExampleDataSeedOutcome, ExampleDataSeedingError, seed_example_data};
pub use self::store::Store;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, PasswordDigest, User, UserId, UserProfile, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use tinylink::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
