use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        auth::{
            AccessTokenDto, ForgotPasswordDto, IdentityDto, LoginDto, ResetPasswordDto,
            VerifyEmailDto,
        },
    },
    server::{
        error::{auth::AuthError, internal::InternalError, AppError},
        middleware::{auth::AuthGuard, refresh_cookie::RefreshCookie},
        service::{
            auth::AuthService,
            jwt::{SignedToken, TokenFamily},
        },
        state::AppState,
        util::parse::parse_request_meta,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

fn auth_service(state: &AppState) -> AuthService<'_> {
    AuthService::new(&state.db, &state.jwt, &state.mailer, &state.recovery)
}

fn access_token_dto(token: SignedToken) -> AccessTokenDto {
    AccessTokenDto {
        access_token: token.token,
        token_type: "Bearer".to_string(),
        expires_at: token.expires_at,
    }
}

/// Log in with email and password.
///
/// Returns an access token in the body and sets the refresh token as an `HttpOnly` cookie.
/// Unknown emails and wrong passwords produce the same response.
///
/// # Returns
/// - `200 OK` - Access token, refresh cookie set
/// - `401 Unauthorized` - Invalid email or password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = AccessTokenDto),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let tokens = auth_service(&state)
        .login(&payload.email, &payload.password)
        .await?;

    let cookie = RefreshCookie::new(&state.refresh_cookie)
        .set(&tokens.refresh.token, state.jwt.ttl(TokenFamily::Refresh))
        .map_err(InternalError::from)?;

    tracing::info!("User {} logged in", tokens.identity.user_id);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(access_token_dto(tokens.access)),
    ))
}

/// Exchange the refresh cookie for a new access token.
///
/// # Returns
/// - `200 OK` - New access token
/// - `401 Unauthorized` - Missing, expired or invalid refresh cookie
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "New access token", body = AccessTokenDto),
        (status = 401, description = "Missing or invalid refresh token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let Some(refresh_token) = RefreshCookie::new(&state.refresh_cookie).read(&headers) else {
        return Err(AuthError::AuthenticationFailed("missing refresh cookie".to_string()).into());
    };

    let access = auth_service(&state).refresh(&refresh_token).await?;

    Ok((StatusCode::OK, Json(access_token_dto(access))))
}

/// Log out by clearing the refresh cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Refresh cookie cleared"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cookie = RefreshCookie::new(&state.refresh_cookie)
        .clear()
        .map_err(InternalError::from)?;

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

/// Get the authenticated identity.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current identity", body = IdentityDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(identity.into_dto())))
}

/// Request a password reset link.
///
/// Always answers 202 so the response does not reveal whether the email has an account.
#[utoipa::path(
    post,
    path = "/api/auth/password/forgot",
    tag = AUTH_TAG,
    request_body = ForgotPasswordDto,
    responses(
        (status = 202, description = "Reset link sent if the account exists"),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_service(&state)
        .request_password_reset(&payload.email, parse_request_meta(&headers))
        .await?;

    Ok(StatusCode::ACCEPTED)
}

/// Set a new password with a reset token.
#[utoipa::path(
    post,
    path = "/api/auth/password/reset",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid or expired link, or password too short", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_service(&state)
        .reset_password(&payload.token, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Request an email verification link for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/auth/email/verification",
    tag = AUTH_TAG,
    responses(
        (status = 202, description = "Verification link sent unless already verified"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn request_email_verification(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    auth_service(&state)
        .request_email_verification(&identity, parse_request_meta(&headers))
        .await?;

    Ok(StatusCode::ACCEPTED)
}

/// Verify an email address with a verification token.
#[utoipa::path(
    post,
    path = "/api/auth/email/verify",
    tag = AUTH_TAG,
    request_body = VerifyEmailDto,
    responses(
        (status = 204, description = "Email verified"),
        (status = 400, description = "Invalid or expired link", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_service(&state).verify_email(&payload.token).await?;

    Ok(StatusCode::NO_CONTENT)
}
