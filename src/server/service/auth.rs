//! Login, session refresh and account recovery.

use sea_orm::DatabaseConnection;
use url::Url;

use crate::server::{
    config::RecoveryConfig,
    data::user::UserRepository,
    error::{auth::AuthError, internal::InternalError, AppError},
    model::{
        auth_token::{RequestMeta, TokenType},
        identity::Identity,
    },
    service::{
        jwt::{JwtVerifier, SignedToken, TokenFamily},
        mail::{MailDispatcher, OutboundMail},
        password::{hash_password, validate_new_password, verify_password},
        token_vault::TokenVault,
    },
};

/// Access and refresh tokens handed out on login.
pub struct SessionTokens {
    pub identity: Identity,
    pub access: SignedToken,
    pub refresh: SignedToken,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtVerifier,
    mailer: &'a MailDispatcher,
    recovery: &'a RecoveryConfig,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        jwt: &'a JwtVerifier,
        mailer: &'a MailDispatcher,
        recovery: &'a RecoveryConfig,
    ) -> Self {
        Self {
            db,
            jwt,
            mailer,
            recovery,
        }
    }

    /// Checks email and password and starts a session.
    ///
    /// # Returns
    /// - `Ok(SessionTokens)` - Fresh access and refresh tokens
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password, indistinguishably
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionTokens, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.password_hash) {
            tracing::debug!("Failed login for user {}", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        let identity = Identity {
            user_id: user.id,
            roles: user_repo.get_roles(user.id).await?,
        };

        Ok(SessionTokens {
            access: self.jwt.issue(&identity, TokenFamily::Access)?,
            refresh: self.jwt.issue(&identity, TokenFamily::Refresh)?,
            identity,
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// Roles are reloaded from the database, so the new token reflects current grants.
    pub async fn refresh(&self, refresh_token: &str) -> Result<SignedToken, AppError> {
        let claims = self.jwt.verify(refresh_token, TokenFamily::Refresh)?;

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

        self.jwt.issue(&identity, TokenFamily::Access)
    }

    /// Mails a password reset link if the email belongs to an account.
    ///
    /// Succeeds the same way whether or not the account exists. Any earlier reset links for
    /// the account stop working.
    pub async fn request_password_reset(
        &self,
        email: &str,
        meta: RequestMeta,
    ) -> Result<(), AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_email(email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let vault = TokenVault::new(self.db);
        vault.invalidate_all(user.id, TokenType::PasswordReset).await?;

        let issued = vault
            .issue(
                user.id,
                TokenType::PasswordReset,
                self.recovery.password_reset_ttl,
                meta,
            )
            .await?;

        let link = self.link("reset-password", &issued.plaintext)?;
        self.mailer.dispatch(OutboundMail::password_reset(
            user.email,
            &link,
            self.recovery.password_reset_ttl.num_minutes(),
        ));

        Ok(())
    }

    /// Sets a new password using a reset token.
    ///
    /// The password is validated before the token is touched, so a rejected password does
    /// not burn the link.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        validate_new_password(new_password)?;

        let vault = TokenVault::new(self.db);
        let identity = vault.consume(token, TokenType::PasswordReset).await?;

        UserRepository::new(self.db)
            .set_password_hash(identity.user_id, hash_password(new_password)?)
            .await?;

        vault
            .invalidate_all(identity.user_id, TokenType::PasswordReset)
            .await?;

        tracing::info!("User {} reset their password", identity.user_id);

        Ok(())
    }

    /// Mails an email verification link to the identity's address.
    ///
    /// Does nothing for an already verified address.
    pub async fn request_email_verification(
        &self,
        identity: &Identity,
        meta: RequestMeta,
    ) -> Result<(), AppError> {
        let Some(user) = UserRepository::new(self.db)
            .find_by_id(identity.user_id)
            .await?
        else {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                identity.user_id
            )));
        };

        if user.email_verified_at.is_some() {
            return Ok(());
        }

        let vault = TokenVault::new(self.db);
        vault
            .invalidate_all(user.id, TokenType::EmailVerification)
            .await?;

        let issued = vault
            .issue(
                user.id,
                TokenType::EmailVerification,
                self.recovery.email_verification_ttl,
                meta,
            )
            .await?;

        let link = self.link("verify-email", &issued.plaintext)?;
        self.mailer
            .dispatch(OutboundMail::email_verification(user.email, &link));

        Ok(())
    }

    /// Marks the email behind a verification token as verified.
    pub async fn verify_email(&self, token: &str) -> Result<(), AppError> {
        let identity = TokenVault::new(self.db)
            .consume(token, TokenType::EmailVerification)
            .await?;

        UserRepository::new(self.db)
            .mark_email_verified(identity.user_id)
            .await?;

        Ok(())
    }

    fn link(&self, path: &str, token: &str) -> Result<Url, AppError> {
        let mut link = self
            .recovery
            .app_url
            .join(path)
            .map_err(InternalError::InvalidLink)?;

        link.query_pairs_mut().append_pair("token", token);

        Ok(link)
    }
}
