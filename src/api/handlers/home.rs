use axum::response::{Html, IntoResponse};

use crate::api::views;

// axum handler for the landing page
pub async fn home() -> impl IntoResponse {
    Html(views::home_page())
}
