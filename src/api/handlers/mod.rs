//! Request handlers and the session cookie plumbing they share.

pub mod dashboard;
pub mod health;
pub mod home;
pub mod login;
pub mod logout;
pub mod signup;

pub use self::dashboard::dashboard;
pub use self::health::health;
pub use self::home::home;
pub use self::login::{login, login_form};
pub use self::logout::logout;
pub use self::signup::{signup, signup_form};


use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};

use super::{AppConfig, AppState};
use crate::auth::SessionRecord;

pub(crate) const SESSION_COOKIE_NAME: &str = "gatepass_session";

/// Build a secure `HttpOnly` cookie for the session token.
pub(crate) fn session_cookie(
    config: &AppConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    // Only mark cookies secure when the site is served over HTTPS.
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if config.secure_cookies() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn clear_session_cookie(config: &AppConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.secure_cookies() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Pull the session token out of the `Cookie` header, if present.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME && !val.is_empty() {
            return Some(val.to_string());
        }
    }
    None
}

/// Route guard: resolve the request's session cookie into an identity.
///
/// `None` means Anonymous; guarded handlers redirect to `/login`.
pub(crate) async fn authenticate(headers: &HeaderMap, state: &AppState) -> Option<SessionRecord> {
    let token = extract_session_token(headers)?;
    state.sessions.resolve(&token).await
}
