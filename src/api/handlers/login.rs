use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::{extract_session_token, session_cookie};
use crate::api::{views, AppState};
use crate::auth::{flow, AuthError};

/// One message for both unknown-user and wrong-password failures, so the login
/// form cannot be used to enumerate usernames. The distinction survives in the
/// logs only.
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

// No Debug derive: the payload carries the plaintext password.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// axum handler for the login form
pub async fn login_form() -> impl IntoResponse {
    Html(views::login_page(None))
}

/// axum handler for login submissions.
///
/// On success the browser's previous session token, if any, is invalidated
/// before the new cookie is set.
#[instrument(skip_all)]
pub async fn login(
    state: Extension<Arc<AppState>>,
    headers: HeaderMap,
    payload: Option<Form<LoginForm>>,
) -> Response {
    let Some(Form(form)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Html(views::login_page(Some("Missing form data"))),
        )
            .into_response();
    };

    let password = SecretString::from(form.password);
    match flow::login(
        state.store.as_ref(),
        &state.sessions,
        &form.username,
        &password,
    )
    .await
    {
        Ok(token) => {
            if let Some(previous) = extract_session_token(&headers) {
                state.sessions.logout(&previous).await;
            }

            match session_cookie(&state.config, &token) {
                Ok(cookie) => {
                    info!(username = %form.username, "login successful");
                    let mut response_headers = HeaderMap::new();
                    response_headers.insert(SET_COOKIE, cookie);
                    (response_headers, Redirect::to("/dashboard")).into_response()
                }
                Err(err) => {
                    error!("failed to build session cookie: {err}");
                    state.sessions.logout(&token).await;
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Html(views::server_error_page()),
                    )
                        .into_response()
                }
            }
        }
        Err(err @ AuthError::Validation(_)) => (
            StatusCode::BAD_REQUEST,
            Html(views::login_page(Some(&err.to_string()))),
        )
            .into_response(),
        Err(AuthError::UserNotFound | AuthError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            Html(views::login_page(Some(INVALID_CREDENTIALS_MESSAGE))),
        )
            .into_response(),
        Err(err) => {
            error!("login failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::server_error_page()),
            )
                .into_response()
        }
    }
}
