use axum::http::HeaderMap;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::identity::{Identity, Role},
    service::jwt::{JwtVerifier, TokenFamily},
    util::parse::parse_bearer_token,
};

pub enum Permission {
    Admin,
    /// Holds at least one of the listed roles.
    AnyRole(&'static [Role]),
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtVerifier,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtVerifier, headers: &'a HeaderMap) -> Self {
        Self { db, jwt, headers }
    }

    /// Authenticates the request and checks every permission.
    ///
    /// The identity comes from the database, not the token claims, so a deleted user or a
    /// revoked role is refused even while the access token is still valid.
    pub async fn require(&self, permissions: &[Permission]) -> Result<Identity, AppError> {
        let Some(token) = parse_bearer_token(self.headers) else {
            return Err(AuthError::AuthenticationFailed("missing bearer token".to_string()).into());
        };

        let claims = self.jwt.verify(token, TokenFamily::Access)?;

        let Some(identity) = UserRepository::new(self.db)
            .find_identity(claims.sub)
            .await?
        else {
            return Err(AuthError::AuthenticationFailed(format!(
                "user {} no longer exists",
                claims.sub
            ))
            .into());
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !identity.is_admin() {
                        return Err(AuthError::AccessDenied(
                            identity.user_id,
                            "Admin role required".to_string(),
                        )
                        .into());
                    }
                }
                Permission::AnyRole(roles) => {
                    if !roles.iter().any(|role| identity.has_role(*role)) {
                        return Err(AuthError::AccessDenied(
                            identity.user_id,
                            format!("One of {:?} required", roles),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(identity)
    }
}
