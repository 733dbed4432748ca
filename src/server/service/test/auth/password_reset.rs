use super::*;

/// Tests requesting a reset for a known email.
///
/// Expected: Ok(()) with one outstanding PASSWORD_RESET token carrying the request metadata
#[tokio::test]
async fn issues_token_for_known_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = user_with_password(db, "player@example.test").await;
    let jwt = jwt();
    let mailer = mailer();
    let recovery = recovery();

    AuthService::new(db, &jwt, &mailer, &recovery)
        .request_password_reset(
            "player@example.test",
            RequestMeta {
                ip: Some("198.51.100.4".to_string()),
                user_agent: None,
            },
        )
        .await?;

    let tokens = stored_tokens(db, user.id).await;
    assert_eq!(tokens.len(), 1);
    assert_eq!(
        tokens[0].r#type,
        entity::sea_orm_active_enums::AuthTokenType::PasswordReset
    );
    assert_eq!(tokens[0].request_ip.as_deref(), Some("198.51.100.4"));

    Ok(())
}

/// Tests requesting a reset for an unknown email.
///
/// Expected: Ok(()) and nothing stored
#[tokio::test]
async fn silent_for_unknown_email() -> Result<(), AppError> {
    use sea_orm::{EntityTrait, PaginatorTrait};

    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let jwt = jwt();
    let mailer = mailer();
    let recovery = recovery();

    AuthService::new(db, &jwt, &mailer, &recovery)
        .request_password_reset("nobody@example.test", RequestMeta::default())
        .await?;

    assert_eq!(entity::prelude::AuthToken::find().count(db).await?, 0);

    Ok(())
}

/// Tests that a second request invalidates the first link.
///
/// Expected: only the newest token remains unconsumed
#[tokio::test]
async fn new_request_invalidates_previous_links() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = user_with_password(db, "player@example.test").await;
    let jwt = jwt();
    let mailer = mailer();
    let recovery = recovery();
    let service = AuthService::new(db, &jwt, &mailer, &recovery);

    service
        .request_password_reset("player@example.test", RequestMeta::default())
        .await?;
    service
        .request_password_reset("player@example.test", RequestMeta::default())
        .await?;

    let tokens = stored_tokens(db, user.id).await;
    assert_eq!(tokens.len(), 2);
    assert_eq!(
        tokens.iter().filter(|t| t.consumed_at.is_none()).count(),
        1
    );

    Ok(())
}

/// Tests resetting the password with a valid token.
///
/// Expected: Ok(()); the new password verifies and the token is spent
#[tokio::test]
async fn resets_password_once() -> Result<(), AppError> {
    use crate::server::data::user::UserRepository;

    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = user_with_password(db, "player@example.test").await;
    let jwt = jwt();
    let mailer = mailer();
    let recovery = recovery();
    let service = AuthService::new(db, &jwt, &mailer, &recovery);

    let issued = TokenVault::new(db)
        .issue(
            user.id,
            TokenType::PasswordReset,
            TimeDelta::minutes(30),
            RequestMeta::default(),
        )
        .await?;

    service
        .reset_password(&issued.plaintext, "a brand new passphrase")
        .await?;

    let stored = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
    assert!(verify_password("a brand new passphrase", &stored.password_hash));
    assert!(!verify_password(PASSWORD, &stored.password_hash));

    let again = service
        .reset_password(&issued.plaintext, "yet another passphrase")
        .await;
    assert!(matches!(
        again,
        Err(AppError::TokenErr(TokenError::AlreadyUsed))
    ));

    Ok(())
}

/// Tests that a weak password is rejected without spending the token.
///
/// Expected: Err(Validation), then Ok(()) with the same token and a valid password
#[tokio::test]
async fn weak_password_keeps_token_usable() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = user_with_password(db, "player@example.test").await;
    let jwt = jwt();
    let mailer = mailer();
    let recovery = recovery();
    let service = AuthService::new(db, &jwt, &mailer, &recovery);

    let issued = TokenVault::new(db)
        .issue(
            user.id,
            TokenType::PasswordReset,
            TimeDelta::minutes(30),
            RequestMeta::default(),
        )
        .await?;

    let weak = service.reset_password(&issued.plaintext, "short").await;
    assert!(matches!(weak, Err(AppError::Validation(_))));

    service
        .reset_password(&issued.plaintext, "long enough now")
        .await?;

    Ok(())
}

/// Tests that an email verification token cannot reset a password.
///
/// Expected: Err(TokenError::InvalidToken)
#[tokio::test]
async fn rejects_verification_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = user_with_password(db, "player@example.test").await;
    let jwt = jwt();
    let mailer = mailer();
    let recovery = recovery();

    let issued = TokenVault::new(db)
        .issue(
            user.id,
            TokenType::EmailVerification,
            TimeDelta::seconds(900),
            RequestMeta::default(),
        )
        .await?;

    let result = AuthService::new(db, &jwt, &mailer, &recovery)
        .reset_password(&issued.plaintext, "a brand new passphrase")
        .await;

    assert!(matches!(
        result,
        Err(AppError::TokenErr(TokenError::InvalidToken))
    ));

    Ok(())
}
