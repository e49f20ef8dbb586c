//! Signup and login orchestration.
//!
//! The handlers call into here with injected store and session instances;
//! nothing in this module touches HTTP.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::store::{CredentialStore, Identity};
use super::{password, validate, AuthError, SessionStore};

/// Register a new identity: validate, check uniqueness, hash, persist.
///
/// The `find_by_username` pre-check gives an early, friendly failure, but the
/// store's unique constraint is the authority; an insert that races past the
/// pre-check still comes back as [`AuthError::DuplicateUsername`]. Does not log
/// the new user in.
pub async fn signup(
    store: &dyn CredentialStore,
    username: &str,
    password: &SecretString,
) -> Result<Identity, AuthError> {
    validate::validate_username(username)?;
    validate::validate_password(password.expose_secret())?;

    if store.find_by_username(username).await?.is_some() {
        return Err(AuthError::DuplicateUsername);
    }

    let digest = password::hash(password.expose_secret()).await?;

    Ok(store.insert(username, &digest).await?)
}

/// Authenticate a credential pair and establish a session.
///
/// Returns the raw session token for the cookie. [`AuthError::UserNotFound`]
/// and [`AuthError::InvalidCredentials`] stay distinct here so the handlers can
/// log which one happened while showing the same message for both.
pub async fn login(
    store: &dyn CredentialStore,
    sessions: &SessionStore,
    username: &str,
    password: &SecretString,
) -> Result<String, AuthError> {
    validate::validate_username(username)?;
    validate::validate_password(password.expose_secret())?;

    let Some(identity) = store.find_by_username(username).await? else {
        debug!("login failed: unknown username");
        return Err(AuthError::UserNotFound);
    };

    if !password::verify(&identity.password_hash, password.expose_secret()).await? {
        debug!("login failed: password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    sessions
        .login(&identity)
        .await
        .map_err(AuthError::Session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::memory::MemoryCredentialStore;
    use crate::auth::store::StoreError;
    use crate::auth::ValidationError;
    use async_trait::async_trait;
    use std::time::Duration;

    fn secret(password: &str) -> SecretString {
        SecretString::from(password.to_string())
    }

    fn sessions() -> SessionStore {
        SessionStore::new(Duration::from_secs(60))
    }

    #[tokio::test]
    async fn signup_then_login_succeeds() -> anyhow::Result<()> {
        let store = MemoryCredentialStore::new();
        let sessions = sessions();

        let identity = signup(&store, "alice", &secret("secretpw")).await?;
        assert_eq!(identity.username, "alice");
        // The digest must never be the plaintext.
        assert_ne!(identity.password_hash, "secretpw");

        let token = login(&store, &sessions, "alice", &secret("secretpw")).await?;
        let record = sessions.resolve(&token).await.expect("session resolves");
        assert_eq!(record.user_id, identity.id);
        assert_eq!(record.username, "alice");
        Ok(())
    }

    #[tokio::test]
    async fn signup_rejects_bad_field_lengths() {
        let store = MemoryCredentialStore::new();

        let err = signup(&store, "abc", &secret("secretpw")).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Validation(ValidationError::Username)
        ));

        let err = signup(&store, "alice", &secret("short")).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Validation(ValidationError::Password)
        ));
    }

    #[tokio::test]
    async fn duplicate_signup_fails_and_keeps_store_unchanged() -> anyhow::Result<()> {
        let store = MemoryCredentialStore::new();

        signup(&store, "alice", &secret("secretpw")).await?;
        let original = store.find_by_username("alice").await?.unwrap();

        let err = signup(&store, "alice", &secret("otherpass"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));

        let after = store.find_by_username("alice").await?.unwrap();
        assert_eq!(after, original);
        Ok(())
    }

    /// Store wrapper whose lookup always misses, so signups reach the insert
    /// and exercise the constraint path behind the pre-check.
    struct BlindLookupStore(MemoryCredentialStore);

    #[async_trait]
    impl CredentialStore for BlindLookupStore {
        async fn find_by_username(&self, _username: &str) -> Result<Option<Identity>, StoreError> {
            Ok(None)
        }

        async fn insert(
            &self,
            username: &str,
            password_hash: &str,
        ) -> Result<Identity, StoreError> {
            self.0.insert(username, password_hash).await
        }
    }

    #[tokio::test]
    async fn insert_race_past_precheck_still_reports_duplicate() -> anyhow::Result<()> {
        let store = BlindLookupStore(MemoryCredentialStore::new());

        signup(&store, "alice", &secret("secretpw")).await?;
        let err = signup(&store, "alice", &secret("otherpass"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));
        Ok(())
    }

    #[tokio::test]
    async fn login_with_unknown_user_fails_without_session() {
        let store = MemoryCredentialStore::new();
        let sessions = sessions();

        let err = login(&store, &sessions, "nobody42", &secret("secretpw"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails_without_session() -> anyhow::Result<()> {
        let store = MemoryCredentialStore::new();
        let sessions = sessions();

        signup(&store, "alice", &secret("secretpw")).await?;
        let err = login(&store, &sessions, "alice", &secret("secretpx"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        Ok(())
    }
}
