use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, court::CourtDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::identity::Role,
        service::court::CourtService,
        state::AppState,
    },
};

/// Tag for grouping court endpoints in OpenAPI documentation
pub static COURT_TAG: &str = "court";

const VENUE_ROLES: &[Role] = &[Role::Admin, Role::Owner];

/// List the courts the caller manages.
///
/// # Access Control
/// - `ADMIN` - Every court
/// - `DUENIO` - Courts of owned venues
#[utoipa::path(
    get,
    path = "/api/courts",
    tag = COURT_TAG,
    responses(
        (status = 200, description = "Managed courts", body = Vec<CourtDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin or venue owner", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_courts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::AnyRole(VENUE_ROLES)])
        .await?;

    let courts: Vec<CourtDto> = CourtService::new(&state.db)
        .list(&identity)
        .await?
        .into_iter()
        .map(|court| court.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(courts)))
}
