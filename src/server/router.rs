use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, block, court, reservation},
    error::{config::ConfigError, AppError},
    state::AppState,
};

/// Sustained recovery requests allowed per client IP: one every `RECOVERY_REPLENISH_SECS`.
const RECOVERY_REPLENISH_SECS: u64 = 12;
const RECOVERY_BURST: u32 = 5;

#[derive(OpenApi)]
#[openapi(info(
    title = "Courtside API",
    description = "Courts, reservations, maintenance blocks and account management"
))]
struct ApiDoc;

pub fn router(cors_allowed_origin: Option<&str>) -> Result<Router<AppState>, AppError> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::refresh))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::me))
        .merge(recovery_router()?)
        .routes(routes!(
            reservation::list_reservations,
            reservation::create_reservation
        ))
        .routes(routes!(
            reservation::get_reservation,
            reservation::update_reservation
        ))
        .routes(routes!(reservation::approve_reservation))
        .routes(routes!(reservation::cancel_reservation))
        .routes(routes!(reservation::list_cancellations))
        .routes(routes!(block::list_blocks, block::create_block))
        .routes(routes!(block::delete_block))
        .routes(routes!(court::list_courts))
        .split_for_parts();

    Ok(router
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(cors_layer(cors_allowed_origin)?))
}

/// Account recovery routes, rate limited per client IP.
fn recovery_router() -> Result<OpenApiRouter<AppState>, AppError> {
    let governor_config = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(RECOVERY_REPLENISH_SECS)
        .burst_size(RECOVERY_BURST)
        .finish()
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            name: "recovery rate limit".to_string(),
            reason: "burst size and period must be non-zero".to_string(),
        })?;

    Ok(OpenApiRouter::new()
        .routes(routes!(auth::forgot_password))
        .routes(routes!(auth::reset_password))
        .routes(routes!(auth::request_email_verification))
        .routes(routes!(auth::verify_email))
        .layer(GovernorLayer::new(governor_config)))
}

/// Allows the configured origin with credentials, so the refresh cookie is sent, or any
/// origin without credentials when none is configured.
fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer, AppError> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match allowed_origin {
        None => Ok(cors.allow_origin(Any)),
        Some(origin) => {
            let origin = HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidEnvVar {
                name: "CORS_ALLOWED_ORIGIN".to_string(),
                reason: e.to_string(),
            })?;

            Ok(cors.allow_origin(origin).allow_credentials(true))
        }
    }
}
