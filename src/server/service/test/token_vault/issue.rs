use super::*;

/// Tests issuing an email verification token with a 900 second lifetime.
///
/// Verifies the plaintext is never stored and the expiry and request metadata are.
///
/// Expected: Ok(IssuedToken) expiring 900 seconds from now
#[tokio::test]
async fn stores_hash_expiry_and_metadata() -> Result<(), AppError> {
    use sea_orm::EntityTrait;

    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let before = Utc::now();
    let issued = TokenVault::new(db)
        .issue(
            user.id,
            TokenType::EmailVerification,
            TimeDelta::seconds(900),
            meta(),
        )
        .await?;
    let after = Utc::now();

    assert_eq!(issued.plaintext.len(), 96);
    assert!(issued.expires_at >= before + TimeDelta::seconds(900));
    assert!(issued.expires_at <= after + TimeDelta::seconds(900));

    let stored = entity::prelude::AuthToken::find().all(db).await?;
    assert_eq!(stored.len(), 1);

    let row = &stored[0];
    assert_eq!(row.user_id, user.id);
    assert_eq!(
        row.r#type,
        entity::sea_orm_active_enums::AuthTokenType::EmailVerification
    );
    assert_ne!(row.token_hash, issued.plaintext);
    assert_eq!(row.token_hash.len(), 64);
    assert!(row.consumed_at.is_none());
    assert_eq!(row.request_ip.as_deref(), Some("203.0.113.7"));
    assert_eq!(row.user_agent.as_deref(), Some("test-agent/1.0"));

    Ok(())
}

/// Tests that every issue yields a distinct plaintext.
///
/// Expected: two different plaintexts
#[tokio::test]
async fn plaintexts_are_unique() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let vault = TokenVault::new(db);

    let first = vault
        .issue(user.id, TokenType::PasswordReset, TimeDelta::minutes(30), meta())
        .await?;
    let second = vault
        .issue(user.id, TokenType::PasswordReset, TimeDelta::minutes(30), meta())
        .await?;

    assert_ne!(first.plaintext, second.plaintext);

    Ok(())
}

/// Tests issuing with a non-positive lifetime.
///
/// Expected: Err(Validation)
#[tokio::test]
async fn rejects_non_positive_ttl() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let vault = TokenVault::new(db);

    let zero = vault
        .issue(user.id, TokenType::PasswordReset, TimeDelta::zero(), meta())
        .await;
    let negative = vault
        .issue(user.id, TokenType::PasswordReset, TimeDelta::seconds(-5), meta())
        .await;

    assert!(matches!(zero, Err(AppError::Validation(_))));
    assert!(matches!(negative, Err(AppError::Validation(_))));

    Ok(())
}
