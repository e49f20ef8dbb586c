//! In-process session authenticator.
//!
//! Each successful login issues an opaque 256-bit random token bound to one
//! identity. Tokens live only in this map and in the browser's cookie; nothing
//! is persisted, so every session dies with the process. Per browser the state
//! machine is Anonymous -> Authenticated -> Anonymous, with logout and expiry
//! both returning to Anonymous.

use anyhow::{Context, Result};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::store::Identity;

/// Identity data carried by a resolved session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug)]
struct Session {
    record: SessionRecord,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a fresh token bound to `identity`.
    ///
    /// The raw token is only returned to set the cookie; expired entries are
    /// purged on the way in so the map does not grow without bound.
    pub async fn login(&self, identity: &Identity) -> Result<String> {
        let token = generate_session_token()?;
        let now = Instant::now();

        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(
            token.clone(),
            Session {
                record: SessionRecord {
                    user_id: identity.id,
                    username: identity.username.clone(),
                },
                expires_at: now + self.ttl,
            },
        );

        Ok(token)
    }

    /// Resolve a token back to its identity.
    ///
    /// Missing, tampered, and expired tokens all resolve to `None`; expired
    /// entries are dropped on the spot.
    pub async fn resolve(&self, token: &str) -> Option<SessionRecord> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(token) {
            Some(session) if session.expires_at > Instant::now() => Some(session.record.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Invalidate a token immediately. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &str) {
        self.sessions.lock().await.remove(token);
    }
}

fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}
