use axum::{
    Router,
    http::{StatusCode, Uri},
    routing::get,
};

use crate::{error::WebError, routes, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404(uri: Uri) -> WebError {
    WebError::NotFound(uri.path().to_string())
}
