use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ConflictDto, ErrorDto},
        reservation::{
            CancelReservationDto, CancellationDto, CreateReservationDto,
            PaginatedReservationsDto, ReservationDto, UpdateReservationDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            identity::Role,
            reservation::{
                CancelReservationParam, CreateReservationParam, GetReservationsParam,
                UpdateReservationParam,
            },
        },
        service::reservation::ReservationService,
        state::AppState,
    },
};

/// Tag for grouping reservation endpoints in OpenAPI documentation
pub static RESERVATION_TAG: &str = "reservation";

const MAX_ENTRIES: u64 = 100;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReservationQuery {
    /// Only reservations on this court
    pub court_id: Option<i32>,
    /// Include cancelled reservations
    #[serde(default)]
    pub include_cancelled: bool,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}

fn service(state: &AppState) -> ReservationService<'_> {
    ReservationService::new(&state.db, &state.mailer, state.booking_timeout)
}

/// List reservations visible to the caller.
///
/// # Access Control
/// - `ADMIN` - Every reservation
/// - `DUENIO` - Reservations on courts of owned venues
/// - `CLIENTE` - Own reservations
#[utoipa::path(
    get,
    path = "/api/reservations",
    tag = RESERVATION_TAG,
    params(ReservationQuery),
    responses(
        (status = 200, description = "Page of reservations", body = PaginatedReservationsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "No role with reservation access", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReservationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let page = service(&state)
        .list(
            &identity,
            GetReservationsParam {
                court_id: query.court_id,
                include_cancelled: query.include_cancelled,
                page: query.page,
                per_page: query.entries.clamp(1, MAX_ENTRIES),
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Book a reservation.
///
/// # Access Control
/// - `ADMIN` - Any customer
/// - `CLIENTE` - Only their own customer record
#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = RESERVATION_TAG,
    request_body = CreateReservationDto,
    responses(
        (status = 201, description = "Reservation booked", body = ReservationDto),
        (status = 400, description = "Invalid interval or amounts", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Cannot book for this customer", body = ErrorDto),
        (status = 404, description = "Court or customer not found", body = ErrorDto),
        (status = 409, description = "Interval overlaps a reservation or block", body = ConflictDto),
        (status = 503, description = "Booking timed out", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateReservationDto>,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let reservation = service(&state)
        .create(&identity, CreateReservationParam::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(reservation.into_dto())))
}

/// Get a reservation by id.
#[utoipa::path(
    get,
    path = "/api/reservations/{id}",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation", body = ReservationDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Reservation outside caller's scope", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let reservation = service(&state).get(&identity, id).await?;

    Ok((StatusCode::OK, Json(reservation.into_dto())))
}

/// Move or reprice a reservation.
#[utoipa::path(
    put,
    path = "/api/reservations/{id}",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation id")),
    request_body = UpdateReservationDto,
    responses(
        (status = 200, description = "Updated reservation", body = ReservationDto),
        (status = 400, description = "Invalid interval or amounts, or reservation completed", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Reservation outside caller's scope", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 409, description = "New interval is taken, or reservation cancelled", body = ConflictDto),
        (status = 503, description = "Update timed out", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReservationDto>,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let reservation = service(&state)
        .update(&identity, UpdateReservationParam::from_dto(id, payload))
        .await?;

    Ok((StatusCode::OK, Json(reservation.into_dto())))
}

/// Approve a pending reservation.
///
/// # Access Control
/// - `ADMIN` - Any reservation
/// - `DUENIO` - Reservations on courts of owned venues
#[utoipa::path(
    post,
    path = "/api/reservations/{id}/approve",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation confirmed", body = ReservationDto),
        (status = 400, description = "Reservation not pending", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the venue's owner", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 409, description = "Reservation cancelled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_reservation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::AnyRole(&[Role::Admin, Role::Owner])])
        .await?;

    let reservation = service(&state).approve(&identity, id).await?;

    Ok((StatusCode::OK, Json(reservation.into_dto())))
}

/// Cancel a reservation, freeing its interval.
#[utoipa::path(
    post,
    path = "/api/reservations/{id}/cancel",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation id")),
    request_body = CancelReservationDto,
    responses(
        (status = 200, description = "Cancellation record", body = CancellationDto),
        (status = 400, description = "Reservation completed", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Reservation outside caller's scope", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 409, description = "Reservation already cancelled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    payload: Option<Json<CancelReservationDto>>,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let payload = payload.map(|Json(dto)| dto).unwrap_or_default();

    let cancellation = service(&state)
        .cancel(&identity, CancelReservationParam::from_dto(id, payload))
        .await?;

    Ok((StatusCode::OK, Json(cancellation.into_dto())))
}

/// List cancellations visible to the caller.
#[utoipa::path(
    get,
    path = "/api/cancellations",
    tag = RESERVATION_TAG,
    responses(
        (status = 200, description = "Cancellations, most recent first", body = Vec<CancellationDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "No role with cancellation access", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_cancellations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let cancellations = service(&state).list_cancellations(&identity).await?;

    Ok((
        StatusCode::OK,
        Json(
            cancellations
                .into_iter()
                .map(|c| c.into_dto())
                .collect::<Vec<CancellationDto>>(),
        ),
    ))
}
