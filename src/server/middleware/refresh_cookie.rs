//! The refresh token cookie.
//!
//! Refresh tokens never appear in response bodies. They travel in an `HttpOnly` cookie
//! scoped to the auth routes, with `SameSite` and `Secure` taken from configuration.

use axum::http::{
    header::{self, InvalidHeaderValue},
    HeaderMap, HeaderValue,
};
use chrono::Duration;
use cookie::Cookie;

use crate::server::config::RefreshCookieConfig;

pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

pub struct RefreshCookie<'a> {
    config: &'a RefreshCookieConfig,
}

impl<'a> RefreshCookie<'a> {
    pub fn new(config: &'a RefreshCookieConfig) -> Self {
        Self { config }
    }

    /// Builds the `Set-Cookie` value carrying `token` for `max_age`.
    pub fn set(&self, token: &str, max_age: Duration) -> Result<HeaderValue, InvalidHeaderValue> {
        let cookie = self
            .builder(token.to_string())
            .max_age(cookie::time::Duration::seconds(max_age.num_seconds().max(0)))
            .build();

        HeaderValue::from_str(&cookie.to_string())
    }

    /// Builds the `Set-Cookie` value that deletes the cookie.
    pub fn clear(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = self.builder(String::new()).build();
        cookie.make_removal();

        HeaderValue::from_str(&cookie.to_string())
    }

    /// Reads the refresh token from the request's `Cookie` headers.
    ///
    /// Malformed pairs are skipped; an empty value counts as absent.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    fn builder(&self, value: String) -> cookie::CookieBuilder<'static> {
        Cookie::build((REFRESH_COOKIE_NAME, value))
            .path(self.config.path.clone())
            .http_only(true)
            .same_site(self.config.same_site)
            .secure(self.config.secure)
    }
}
