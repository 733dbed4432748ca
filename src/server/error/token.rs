use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Reasons a single-use token was rejected.
///
/// The variants exist for logs and tests. Over HTTP all three look the same.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// No token with this hash and type exists.
    #[error("Token not recognized")]
    InvalidToken,

    /// Token was consumed before.
    #[error("Token has already been used")]
    AlreadyUsed,

    /// Token expiry has passed.
    #[error("Token has expired")]
    Expired,
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected token: {}", self);

        (
            StatusCode::BAD_REQUEST,
            Json(ErrorDto {
                error: "This link is invalid or has expired".to_string(),
            }),
        )
            .into_response()
    }
}
