//! Credential and session handling.
//!
//! Split into layers the request handlers compose: pure field validation
//! ([`validate`]), the bcrypt hasher ([`password`]), the credential store
//! ([`store`]), the session authenticator ([`session`]), and the signup/login
//! orchestration ([`flow`]).

pub mod flow;
pub mod password;
pub mod session;
pub mod store;
pub mod validate;

pub use self::password::HashError;
pub use self::session::{SessionRecord, SessionStore};
pub use self::store::{CredentialStore, Identity, StoreError};
pub use self::validate::ValidationError;

use thiserror::Error;

/// Everything that can go wrong between a form submission and a response.
///
/// All variants are recovered at the request boundary; none abort the process.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("username is already taken")]
    DuplicateUsername,

    /// Kept distinct from `InvalidCredentials` for logs; the user-facing
    /// message is unified to avoid username enumeration.
    #[error("unknown username")]
    UserNotFound,

    #[error("wrong password")]
    InvalidCredentials,

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("storage error: {0}")]
    Storage(#[source] sqlx::Error),

    #[error("session error: {0}")]
    Session(#[source] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => Self::DuplicateUsername,
            StoreError::Backend(err) => Self::Storage(err),
        }
    }
}
