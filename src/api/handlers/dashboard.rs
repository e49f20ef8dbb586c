use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::authenticate;
use crate::api::{views, AppState};

/// axum handler for the protected dashboard.
///
/// Anonymous requests are redirected to the login page; authenticated ones get
/// the page rendered with their username.
pub async fn dashboard(state: Extension<Arc<AppState>>, headers: HeaderMap) -> Response {
    match authenticate(&headers, &state).await {
        Some(record) => Html(views::dashboard_page(&record.username)).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}
