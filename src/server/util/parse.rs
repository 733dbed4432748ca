use axum::http::{header, HeaderMap};

use crate::server::model::auth_token::RequestMeta;

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// # Returns
/// - `Some(&str)` - Non-empty bearer token
/// - `None` - Header missing, not UTF-8, or not a bearer credential
pub fn parse_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Collects the client IP and user agent recorded with issued tokens.
///
/// Takes the first hop of `X-Forwarded-For`, falling back to `X-Real-IP`.
pub fn parse_request_meta(headers: &HeaderMap) -> RequestMeta {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let ip = header_str("x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .or_else(|| header_str("x-real-ip"))
        .map(str::to_string);

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    RequestMeta { ip, user_agent }
}
