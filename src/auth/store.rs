//! Credential persistence.
//!
//! The store is injected into the handlers behind the [`CredentialStore`] trait
//! so the flow logic can be exercised without a database. The Postgres
//! implementation is the production one; the unique constraint on `username` is
//! the authority for duplicates, the pre-insert lookup in the flow layer is
//! only a fast path.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use thiserror::Error;
use tracing::Instrument;

/// A registered username with its hashed credential.
///
/// Created once at signup; never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Store-assigned, immutable.
    pub id: i64,
    pub username: String,
    /// bcrypt digest, never the plaintext.
    pub password_hash: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username is already taken")]
    DuplicateUsername,

    #[error(transparent)]
    Backend(#[from] sqlx::Error),
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Exact, case-sensitive lookup.
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError>;

    /// Insert a new identity. Durable once this returns `Ok`; a concurrent
    /// insert of the same username fails with [`StoreError::DuplicateUsername`].
    async fn insert(&self, username: &str, password_hash: &str) -> Result<Identity, StoreError>;
}

const SCHEMA_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id            BIGSERIAL PRIMARY KEY,
        username      TEXT      NOT NULL UNIQUE,
        password_hash TEXT      NOT NULL
    )
";

/// Create the users table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}

/// Postgres-backed credential store.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError> {
        let query = "SELECT id, username, password_hash FROM users WHERE username = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(row.map(|row| Identity {
            id: row.get("id"),
            username: row.get("username"),
            password_hash: row.get("password_hash"),
        }))
    }

    async fn insert(&self, username: &str, password_hash: &str) -> Result<Identity, StoreError> {
        // Committing the transaction is the durability boundary; nothing is
        // visible to other sessions before it returns.
        let mut tx = self.pool.begin().await?;

        let query = "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(username)
            .bind(password_hash)
            .fetch_one(&mut *tx)
            .instrument(span)
            .await;

        let id: i64 = match row {
            Ok(row) => row.get("id"),
            Err(err) => {
                let _ = tx.rollback().await;
                if is_unique_violation(&err) {
                    return Err(StoreError::DuplicateUsername);
                }
                return Err(err.into());
            }
        };

        tx.commit().await?;

        Ok(Identity {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
pub mod memory {
    //! In-memory store used by flow and handler tests.

    use super::{CredentialStore, Identity, StoreError};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct MemoryCredentialStore {
        records: Mutex<Vec<Identity>>,
    }

    impl MemoryCredentialStore {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl CredentialStore for MemoryCredentialStore {
        async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError> {
            let records = self.records.lock().await;
            Ok(records
                .iter()
                .find(|identity| identity.username == username)
                .cloned())
        }

        async fn insert(
            &self,
            username: &str,
            password_hash: &str,
        ) -> Result<Identity, StoreError> {
            // Check-then-insert under one lock, mirroring the database
            // unique constraint.
            let mut records = self.records.lock().await;
            if records.iter().any(|identity| identity.username == username) {
                return Err(StoreError::DuplicateUsername);
            }

            let identity = Identity {
                id: records.len() as i64 + 1,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            };
            records.push(identity.clone());
            Ok(identity)
        }
    }
}
