use std::time::Duration as StdDuration;

use chrono::Duration;
use cookie::SameSite;
use url::Url;

use crate::server::{
    error::{config::ConfigError, AppError},
    service::jwt::SecretFamily,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;
const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 14 * 24 * 60 * 60;
const DEFAULT_PASSWORD_RESET_TTL_SECS: i64 = 60 * 60;
const DEFAULT_EMAIL_VERIFICATION_TTL_SECS: i64 = 24 * 60 * 60;
const DEFAULT_BOOKING_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_REFRESH_COOKIE_PATH: &str = "/api/auth";
const DEFAULT_MAIL_FROM: &str = "no-reply@courtside.local";

#[derive(Debug, Clone)]
pub struct RefreshCookieConfig {
    pub path: String,
    pub same_site: SameSite,
    pub secure: bool,
}

/// Settings for account recovery links.
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Base URL of the web app; always ends with `/`.
    pub app_url: Url,
    pub password_reset_ttl: Duration,
    pub email_verification_ttl: Duration,
}

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,

    pub access_token: SecretFamily,
    pub refresh_token: SecretFamily,
    pub refresh_cookie: RefreshCookieConfig,

    pub recovery: RecoveryConfig,

    /// Deadline for each booking transaction.
    pub booking_timeout: StdDuration,
    pub db_connect_timeout: StdDuration,

    /// Webhook of the transactional mail relay. Mail is logged and dropped when unset.
    pub mail_webhook_url: Option<Url>,
    pub mail_from: String,

    /// Origin allowed by CORS. Any origin when unset.
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let env = EnvReader { lookup };

        let refresh_cookie = RefreshCookieConfig {
            path: env
                .optional("REFRESH_COOKIE_PATH")
                .unwrap_or_else(|| DEFAULT_REFRESH_COOKIE_PATH.to_string()),
            same_site: match env.optional("REFRESH_COOKIE_SAMESITE").as_deref() {
                None => SameSite::Strict,
                Some(value) => parse_same_site(value)?,
            },
            secure: env.parse_or("REFRESH_COOKIE_SECURE", true)?,
        };

        if refresh_cookie.same_site == SameSite::None && !refresh_cookie.secure {
            return Err(ConfigError::InvalidEnvVar {
                name: "REFRESH_COOKIE_SAMESITE".to_string(),
                reason: "SameSite=None requires REFRESH_COOKIE_SECURE=true".to_string(),
            }
            .into());
        }

        Ok(Self {
            database_url: env.required("DATABASE_URL")?,
            bind_addr: env
                .optional("BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            access_token: SecretFamily {
                primary: env.required("JWT_ACCESS_SECRET")?,
                legacy: parse_list(env.optional("JWT_ACCESS_LEGACY_SECRETS")),
                ttl: Duration::seconds(
                    env.parse_or("ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?,
                ),
            },
            refresh_token: SecretFamily {
                primary: env.required("JWT_REFRESH_SECRET")?,
                legacy: parse_list(env.optional("JWT_REFRESH_LEGACY_SECRETS")),
                ttl: Duration::seconds(
                    env.parse_or("REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TOKEN_TTL_SECS)?,
                ),
            },
            refresh_cookie,
            recovery: RecoveryConfig {
                app_url: parse_app_url(&env.required("APP_URL")?)?,
                password_reset_ttl: Duration::seconds(
                    env.parse_or("PASSWORD_RESET_TTL_SECS", DEFAULT_PASSWORD_RESET_TTL_SECS)?,
                ),
                email_verification_ttl: Duration::seconds(env.parse_or(
                    "EMAIL_VERIFICATION_TTL_SECS",
                    DEFAULT_EMAIL_VERIFICATION_TTL_SECS,
                )?),
            },
            booking_timeout: StdDuration::from_secs(
                env.parse_or("BOOKING_TIMEOUT_SECS", DEFAULT_BOOKING_TIMEOUT_SECS)?,
            ),
            db_connect_timeout: StdDuration::from_secs(
                env.parse_or("DB_CONNECT_TIMEOUT_SECS", DEFAULT_DB_CONNECT_TIMEOUT_SECS)?,
            ),
            mail_webhook_url: env
                .optional("MAIL_WEBHOOK_URL")
                .map(|value| {
                    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar {
                        name: "MAIL_WEBHOOK_URL".to_string(),
                        reason: e.to_string(),
                    })
                })
                .transpose()?,
            mail_from: env
                .optional("MAIL_FROM")
                .unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
            cors_allowed_origin: env.optional("CORS_ALLOWED_ORIGIN"),
        })
    }
}

struct EnvReader<F: Fn(&str) -> Option<String>> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> EnvReader<F> {
    /// Empty values count as unset.
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.optional(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn parse_or<T>(&self, name: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(name) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar {
                    name: name.to_string(),
                    reason: e.to_string(),
                }),
        }
    }
}

/// Splits a comma-separated list, dropping blanks.
fn parse_list(value: Option<String>) -> Vec<String> {
    value
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_same_site(value: &str) -> Result<SameSite, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(SameSite::Strict),
        "lax" => Ok(SameSite::Lax),
        "none" => Ok(SameSite::None),
        other => Err(ConfigError::InvalidEnvVar {
            name: "REFRESH_COOKIE_SAMESITE".to_string(),
            reason: format!("expected strict, lax or none, got '{}'", other),
        }),
    }
}

/// Parses the app URL so relative joins append to it instead of replacing its last segment.
fn parse_app_url(value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar {
        name: "APP_URL".to_string(),
        reason: e.to_string(),
    })?;

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
