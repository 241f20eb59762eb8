use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("No route for {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl WebError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// Both variants render the static error page; details stay in the logs.
impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::debug!("{self}");
        (self.status(), Html(views::error_page())).into_response()
    }
}
