use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No usable credentials on the request.
    ///
    /// Covers a missing or malformed bearer header, a token that fails verification under
    /// every configured secret, and a token whose user no longer exists. Results in 401
    /// Unauthorized.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Login email or password did not match.
    ///
    /// Deliberately indistinguishable between unknown email and wrong password. Results in
    /// 401 Unauthorized.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Authenticated user lacks a required role.
    ///
    /// # Fields
    /// - User ID that was denied
    /// - Description of what was denied, logged only
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// Details are logged at debug level; clients only ever see generic messages.
///
/// # Returns
/// - 401 Unauthorized - `AuthenticationFailed`, `InvalidCredentials`
/// - 403 Forbidden - `AccessDenied`
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::AuthenticationFailed(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Authentication required".to_string(),
                }),
            )
                .into_response(),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Invalid email or password".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Insufficient permissions".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
