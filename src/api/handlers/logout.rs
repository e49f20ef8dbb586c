use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::error;

use super::{clear_session_cookie, extract_session_token};
use crate::api::AppState;

/// axum handler for logout. Guarded: without an active session this redirects
/// to the login page, like any other protected route.
pub async fn logout(state: Extension<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(token) = extract_session_token(&headers) else {
        return Redirect::to("/login").into_response();
    };

    if state.sessions.resolve(&token).await.is_none() {
        return Redirect::to("/login").into_response();
    }

    state.sessions.logout(&token).await;

    // Clear the cookie as well, so the browser stops presenting a dead token.
    let mut response_headers = HeaderMap::new();
    match clear_session_cookie(&state.config) {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("failed to build clearing cookie: {err}"),
    }

    (response_headers, Redirect::to("/")).into_response()
}
