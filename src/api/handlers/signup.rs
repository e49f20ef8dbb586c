use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::api::{views, AppState};
use crate::auth::{flow, AuthError};

const DUPLICATE_USERNAME_MESSAGE: &str = "That username is already taken, please choose another";

// No Debug derive: the payload carries the plaintext password.
#[derive(Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
}

// axum handler for the signup form
pub async fn signup_form() -> impl IntoResponse {
    Html(views::signup_page(None))
}

/// axum handler for signup submissions.
///
/// Creates the identity and redirects to the login page; signing up does not
/// log the new user in.
#[instrument(skip_all)]
pub async fn signup(
    state: Extension<Arc<AppState>>,
    payload: Option<Form<SignupForm>>,
) -> Response {
    let Some(Form(form)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Html(views::signup_page(Some("Missing form data"))),
        )
            .into_response();
    };

    let password = SecretString::from(form.password);
    match flow::signup(state.store.as_ref(), &form.username, &password).await {
        Ok(identity) => {
            info!(username = %identity.username, "user created");
            Redirect::to("/login").into_response()
        }
        Err(err @ AuthError::Validation(_)) => (
            StatusCode::BAD_REQUEST,
            Html(views::signup_page(Some(&err.to_string()))),
        )
            .into_response(),
        Err(AuthError::DuplicateUsername) => (
            StatusCode::CONFLICT,
            Html(views::signup_page(Some(DUPLICATE_USERNAME_MESSAGE))),
        )
            .into_response(),
        Err(err) => {
            error!("signup failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::server_error_page()),
            )
                .into_response()
        }
    }
}
