//! The home page: a static form posting to the classify endpoint.

use axum::response::Html;

const HOME_PAGE: &str = include_str!("../assets/home.html");

pub(crate) async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}
