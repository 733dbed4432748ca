//! Single-use tokens for password reset and email verification.
//!
//! The plaintext is 48 random bytes, hex-encoded, and leaves the server exactly once inside
//! a mailed link. Only its SHA-256 digest is stored, so a database leak yields no usable
//! tokens.

use chrono::{Duration, Utc};
use rand::RngCore;
use sea_orm::DatabaseConnection;
use sha2::{Digest, Sha256};

use crate::server::{
    data::{auth_token::AuthTokenRepository, user::UserRepository},
    error::{token::TokenError, AppError},
    model::{
        auth_token::{IssuedToken, RequestMeta, TokenType},
        identity::Identity,
    },
};

const TOKEN_ENTROPY_BYTES: usize = 48;

pub struct TokenVault<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TokenVault<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Issues a token for the user.
    ///
    /// # Arguments
    /// - `user_id` - Account the token acts for
    /// - `token_type` - Purpose; the token only consumes under this type
    /// - `ttl` - Lifetime, must be positive
    /// - `meta` - Request IP and user agent, stored for auditing
    ///
    /// # Returns
    /// - `Ok(IssuedToken)` - Plaintext and expiry
    /// - `Err(AppError::Validation)` - Non-positive `ttl`
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn issue(
        &self,
        user_id: i32,
        token_type: TokenType,
        ttl: Duration,
        meta: RequestMeta,
    ) -> Result<IssuedToken, AppError> {
        if ttl <= Duration::zero() {
            return Err(AppError::Validation(format!(
                "Token lifetime must be positive, got {} seconds",
                ttl.num_seconds()
            )));
        }

        let plaintext = generate_secret();
        let expires_at = Utc::now() + ttl;

        AuthTokenRepository::new(self.db)
            .create(user_id, token_type, hash_secret(&plaintext), expires_at, meta)
            .await?;

        Ok(IssuedToken {
            plaintext,
            expires_at,
        })
    }

    /// Consumes a token, at most once.
    ///
    /// Checks run in order: the hash must exist under `token_type`, the token must not be
    /// consumed, and it must not be expired. The final consume is a compare-and-set, so of
    /// two concurrent calls with the same plaintext exactly one succeeds.
    ///
    /// # Returns
    /// - `Ok(Identity)` - The user the token was issued for
    /// - `Err(TokenError::InvalidToken)` - Unknown plaintext, or wrong type
    /// - `Err(TokenError::AlreadyUsed)` - Consumed before
    /// - `Err(TokenError::Expired)` - Past its expiry
    pub async fn consume(
        &self,
        plaintext: &str,
        token_type: TokenType,
    ) -> Result<Identity, AppError> {
        let repo = AuthTokenRepository::new(self.db);

        let Some(token) = repo
            .find_by_hash(&hash_secret(plaintext), token_type)
            .await?
        else {
            return Err(TokenError::InvalidToken.into());
        };

        if token.consumed_at.is_some() {
            return Err(TokenError::AlreadyUsed.into());
        }

        let now = Utc::now();
        if token.is_expired_at(now) {
            return Err(TokenError::Expired.into());
        }

        if !repo.mark_consumed(token.id, now).await? {
            return Err(TokenError::AlreadyUsed.into());
        }

        UserRepository::new(self.db)
            .find_identity(token.user_id)
            .await?
            .ok_or_else(|| TokenError::InvalidToken.into())
    }

    /// Invalidates every outstanding token of one type for the user.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of tokens invalidated
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn invalidate_all(&self, user_id: i32, token_type: TokenType) -> Result<u64, AppError> {
        let count = AuthTokenRepository::new(self.db)
            .invalidate_outstanding(user_id, token_type, Utc::now())
            .await?;

        Ok(count)
    }
}

fn generate_secret() -> String {
    let mut bytes = [0u8; TOKEN_ENTROPY_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    hex::encode(bytes)
}

fn hash_secret(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}
