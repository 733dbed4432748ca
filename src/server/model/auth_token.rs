//! Single-use account recovery token models.

use chrono::{DateTime, Utc};

/// Purpose a token was issued for. A token only ever consumes under its own type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    PasswordReset,
    EmailVerification,
}

impl TokenType {
    pub fn into_entity(self) -> entity::sea_orm_active_enums::AuthTokenType {
        use entity::sea_orm_active_enums::AuthTokenType;

        match self {
            Self::PasswordReset => AuthTokenType::PasswordReset,
            Self::EmailVerification => AuthTokenType::EmailVerification,
        }
    }
}

/// Request metadata recorded alongside an issued token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// The one and only time the plaintext of a token is available.
///
/// Only its hash is stored; the plaintext goes out in the mailed link and nowhere else.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub plaintext: String,
    pub expires_at: DateTime<Utc>,
}

/// A stored token row.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub id: i32,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
}

impl AuthToken {
    pub fn from_entity(entity: entity::auth_token::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            expires_at: entity.expires_at,
            consumed_at: entity.consumed_at,
        }
    }

    /// A token is still usable at its exact expiry instant and expired strictly after it.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
