//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler through Axum's
//! state extraction. Every field is cheap to clone: the database connection is a pool
//! handle and the rest sit behind `Arc` or are `Arc`-backed internally.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::{RecoveryConfig, RefreshCookieConfig},
    service::{jwt::JwtVerifier, mail::MailDispatcher},
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Signs and verifies access and refresh tokens.
    pub jwt: Arc<JwtVerifier>,

    /// Sends mail on background tasks.
    pub mailer: MailDispatcher,

    /// Attributes of the refresh token cookie.
    pub refresh_cookie: Arc<RefreshCookieConfig>,

    /// App URL and token lifetimes for recovery links.
    pub recovery: Arc<RecoveryConfig>,

    /// Deadline for each booking transaction.
    pub booking_timeout: std::time::Duration,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        jwt: JwtVerifier,
        mailer: MailDispatcher,
        refresh_cookie: RefreshCookieConfig,
        recovery: RecoveryConfig,
        booking_timeout: std::time::Duration,
    ) -> Self {
        Self {
            db,
            jwt: Arc::new(jwt),
            mailer,
            refresh_cookie: Arc::new(refresh_cookie),
            recovery: Arc::new(recovery),
            booking_timeout,
        }
    }
}
