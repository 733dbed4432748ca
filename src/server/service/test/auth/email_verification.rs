use super::*;

/// Tests requesting verification for an unverified address.
///
/// Expected: Ok(()) with one EMAIL_VERIFICATION token expiring 900 seconds out
#[tokio::test]
async fn issues_verification_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = user_with_password(db, "player@example.test").await;
    let identity = identity_of(db, user.id).await;
    let jwt = jwt();
    let mailer = mailer();
    let recovery = recovery();

    let before = Utc::now();
    AuthService::new(db, &jwt, &mailer, &recovery)
        .request_email_verification(&identity, RequestMeta::default())
        .await?;
    let after = Utc::now();

    let tokens = stored_tokens(db, user.id).await;
    assert_eq!(tokens.len(), 1);
    assert_eq!(
        tokens[0].r#type,
        entity::sea_orm_active_enums::AuthTokenType::EmailVerification
    );
    assert!(tokens[0].expires_at >= before + TimeDelta::seconds(900));
    assert!(tokens[0].expires_at <= after + TimeDelta::seconds(900));

    Ok(())
}

/// Tests requesting verification for an already verified address.
///
/// Expected: Ok(()) and no token issued
#[tokio::test]
async fn skips_verified_address() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .verified()
        .role(entity::sea_orm_active_enums::Role::Cliente)
        .build()
        .await?;
    let identity = identity_of(db, user.id).await;
    let jwt = jwt();
    let mailer = mailer();
    let recovery = recovery();

    AuthService::new(db, &jwt, &mailer, &recovery)
        .request_email_verification(&identity, RequestMeta::default())
        .await?;

    assert!(stored_tokens(db, user.id).await.is_empty());

    Ok(())
}

/// Tests verifying an address with a valid token.
///
/// Expected: Ok(()) and the user's email marked verified
#[tokio::test]
async fn marks_email_verified() -> Result<(), AppError> {
    use crate::server::data::user::UserRepository;

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

    AuthService::new(db, &jwt, &mailer, &recovery)
        .verify_email(&issued.plaintext)
        .await?;

    let stored = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
    assert!(stored.email_verified_at.is_some());

    Ok(())
}

/// Tests verifying with an expired token.
///
/// Expected: Err(TokenError::Expired) and the email stays unverified
#[tokio::test]
async fn expired_token_leaves_email_unverified() -> Result<(), AppError> {
    use crate::server::data::user::UserRepository;

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
    expire_tokens(db, user.id).await;

    let result = AuthService::new(db, &jwt, &mailer, &recovery)
        .verify_email(&issued.plaintext)
        .await;
    assert!(matches!(result, Err(AppError::TokenErr(TokenError::Expired))));

    let stored = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
    assert!(stored.email_verified_at.is_none());

    Ok(())
}
