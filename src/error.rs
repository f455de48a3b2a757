use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::views;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("Content cannot be empty")]
    EmptyContent,
    #[error("no free paste id after {attempts} attempts")]
    KeySpaceExhausted { attempts: usize },
    #[error("paste store lock poisoned")]
    Poisoned,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            // the not-found page is rendered, everything else is plain text
            ApiError::NotFound => {
                return (StatusCode::NOT_FOUND, views::not_found()).into_response();
            }
            ApiError::EmptyContent => StatusCode::BAD_REQUEST,
            ApiError::KeySpaceExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Poisoned => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status_code, format!("{self}")).into_response()
    }
}
