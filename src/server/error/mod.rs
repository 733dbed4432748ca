//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error type returned by services and controllers. It wraps
//! domain-specific errors and implements `IntoResponse`, so handlers can return
//! `Result<_, AppError>` and let the error pick its own status code.

pub mod auth;
pub mod config;
pub mod internal;
pub mod token;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::{ConflictDto, ErrorDto},
    server::{
        error::{auth::AuthError, config::ConfigError, internal::InternalError, token::TokenError},
        model::slot::SlotKind,
    },
};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic conversion. Domain errors like `AuthError`
/// and `TokenError` handle their own response mapping, while the booking variants map
/// directly to status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization failure at the request boundary.
    ///
    /// Delegates to `AuthError::into_response()` (401 or 403).
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Single-use token rejected.
    ///
    /// Delegates to `TokenError::into_response()`, which never tells the client which check
    /// failed.
    #[error(transparent)]
    TokenErr(#[from] TokenError),

    /// Unexpected internal failure.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Socket bind or serve error.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Request failed validation.
    ///
    /// Results in 400 Bad Request with the provided message.
    #[error("{0}")]
    Validation(String),

    /// Proposed interval overlaps an active reservation or block on the same court.
    ///
    /// Results in 409 Conflict naming the kind and id of the clashing row.
    #[error("Time slot conflicts with existing {kind} {conflicting_id}")]
    Conflict {
        kind: SlotKind,
        conflicting_id: i32,
    },

    /// Resource not found.
    ///
    /// Results in 404 Not Found with the provided message.
    #[error("{0}")]
    NotFound(String),

    /// Resource exists but lies outside the caller's scope.
    ///
    /// Results in 403 Forbidden. The message is logged, a generic one is returned.
    #[error("{0}")]
    Forbidden(String),

    /// Reservation was already cancelled.
    ///
    /// Results in 409 Conflict.
    #[error("Reservation {0} has already been cancelled")]
    AlreadyCancelled(i32),

    /// A transactional unit did not finish within its deadline and was rolled back.
    ///
    /// Results in 503 Service Unavailable so the client can retry.
    #[error("{0} timed out")]
    Timeout(String),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - `Validation`
/// - 403 Forbidden - `Forbidden`
/// - 404 Not Found - `NotFound`
/// - 409 Conflict - `Conflict`, `AlreadyCancelled`
/// - 503 Service Unavailable - `Timeout`
/// - Variable - `AuthErr` and `TokenErr` delegate to their own mapping
/// - 500 Internal Server Error - Everything else
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::TokenErr(err) => err.into_response(),
            Self::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::Forbidden(msg) => {
                tracing::debug!("Forbidden: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: "You do not have access to this resource".to_string(),
                    }),
                )
                    .into_response()
            }
            err @ Self::Conflict {
                kind,
                conflicting_id,
            } => (
                StatusCode::CONFLICT,
                Json(ConflictDto {
                    error: err.to_string(),
                    kind: kind.to_string(),
                    conflicting_id,
                }),
            )
                .into_response(),
            err @ Self::AlreadyCancelled(_) => (
                StatusCode::CONFLICT,
                Json(ErrorDto {
                    error: err.to_string(),
                }),
            )
                .into_response(),
            Self::Timeout(msg) => {
                tracing::warn!("{} timed out", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorDto {
                        error: "The request took too long, please try again".to_string(),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error and returns a generic message so implementation details never reach
/// the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
