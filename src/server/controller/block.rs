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
        block::{BlockDto, CreateBlockDto, PaginatedBlocksDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            block::{CreateBlockParam, GetBlocksParam},
            identity::Role,
        },
        service::block::BlockService,
        state::AppState,
    },
};

/// Tag for grouping block endpoints in OpenAPI documentation
pub static BLOCK_TAG: &str = "block";

const MAX_ENTRIES: u64 = 100;

const VENUE_ROLES: &[Role] = &[Role::Admin, Role::Owner];

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlockQuery {
    /// Only blocks on this court
    pub court_id: Option<i32>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}

/// List maintenance blocks on the caller's courts.
///
/// # Access Control
/// - `ADMIN` - Every block
/// - `DUENIO` - Blocks on courts of owned venues
#[utoipa::path(
    get,
    path = "/api/blocks",
    tag = BLOCK_TAG,
    params(BlockQuery),
    responses(
        (status = 200, description = "Page of blocks", body = PaginatedBlocksDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin or venue owner", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_blocks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BlockQuery>,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::AnyRole(VENUE_ROLES)])
        .await?;

    let page = BlockService::new(&state.db, state.booking_timeout)
        .list(
            &identity,
            GetBlocksParam {
                court_id: query.court_id,
                page: query.page,
                per_page: query.entries.clamp(1, MAX_ENTRIES),
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Block a court for maintenance.
#[utoipa::path(
    post,
    path = "/api/blocks",
    tag = BLOCK_TAG,
    request_body = CreateBlockDto,
    responses(
        (status = 201, description = "Block placed", body = BlockDto),
        (status = 400, description = "Invalid interval", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the court's venue owner", body = ErrorDto),
        (status = 404, description = "Court not found", body = ErrorDto),
        (status = 409, description = "Interval overlaps a reservation or block", body = ConflictDto),
        (status = 503, description = "Placement timed out", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_block(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateBlockDto>,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::AnyRole(VENUE_ROLES)])
        .await?;

    let block = BlockService::new(&state.db, state.booking_timeout)
        .create(&identity, CreateBlockParam::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(block.into_dto())))
}

/// Remove a block, freeing its interval.
#[utoipa::path(
    delete,
    path = "/api/blocks/{id}",
    tag = BLOCK_TAG,
    params(("id" = i32, Path, description = "Block id")),
    responses(
        (status = 204, description = "Block removed"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the court's venue owner", body = ErrorDto),
        (status = 404, description = "Block not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_block(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::AnyRole(VENUE_ROLES)])
        .await?;

    BlockService::new(&state.db, state.booking_timeout)
        .remove(&identity, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
