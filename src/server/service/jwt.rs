//! Signed session tokens.
//!
//! Access and refresh tokens are HS256 JWTs, each family with its own secret. Every family
//! has one primary secret used for signing plus any number of legacy secrets that are still
//! accepted for verification, so secrets can be rotated without logging everybody out.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::server::{
    error::{auth::AuthError, internal::InternalError, AppError},
    model::identity::{Identity, Role},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenFamily {
    Access,
    Refresh,
}

/// Secrets and lifetime of one token family.
#[derive(Debug, Clone)]
pub struct SecretFamily {
    /// Signs new tokens and verifies first.
    pub primary: String,
    /// Previous secrets, tried in order after the primary.
    pub legacy: Vec<String>,
    pub ttl: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub roles: Vec<Role>,
    pub typ: TokenFamily,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct SignedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct JwtVerifier {
    access: SecretFamily,
    refresh: SecretFamily,
}

impl JwtVerifier {
    pub fn new(access: SecretFamily, refresh: SecretFamily) -> Self {
        Self { access, refresh }
    }

    fn family(&self, family: TokenFamily) -> &SecretFamily {
        match family {
            TokenFamily::Access => &self.access,
            TokenFamily::Refresh => &self.refresh,
        }
    }

    pub fn ttl(&self, family: TokenFamily) -> Duration {
        self.family(family).ttl
    }

    /// Signs a token for `identity` with the family's primary secret.
    pub fn issue(&self, identity: &Identity, family: TokenFamily) -> Result<SignedToken, AppError> {
        let secrets = self.family(family);
        let issued_at = Utc::now();
        let expires_at = issued_at + secrets.ttl;

        let claims = Claims {
            sub: identity.user_id,
            roles: identity.roles.iter().copied().collect(),
            typ: family,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secrets.primary.as_bytes()),
        )
        .map_err(InternalError::TokenSigning)?;

        Ok(SignedToken { token, expires_at })
    }

    /// Verifies a token against the family's primary secret, then each legacy secret.
    ///
    /// Only a signature mismatch moves on to the next secret. A token that is expired or
    /// malformed, or that belongs to the other family, fails straight away.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Token signed by one of the family's secrets and still valid
    /// - `Err(AppError::AuthErr)` - Token rejected
    pub fn verify(&self, token: &str, family: TokenFamily) -> Result<Claims, AppError> {
        let secrets = self.family(family);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        for secret in std::iter::once(&secrets.primary).chain(secrets.legacy.iter()) {
            match decode::<Claims>(
                token,
                &DecodingKey::from_secret(secret.as_bytes()),
                &validation,
            ) {
                Ok(data) => {
                    if data.claims.typ != family {
                        return Err(AuthError::AuthenticationFailed(format!(
                            "expected {:?} token, got {:?}",
                            family, data.claims.typ
                        ))
                        .into());
                    }

                    return Ok(data.claims);
                }
                Err(err) if matches!(err.kind(), ErrorKind::InvalidSignature) => continue,
                Err(err) => {
                    return Err(AuthError::AuthenticationFailed(err.to_string()).into());
                }
            }
        }

        Err(AuthError::AuthenticationFailed("signature matches no configured secret".to_string()).into())
    }
}
