use super::*;

/// Tests that invalidation stops outstanding tokens of the given type only.
///
/// Expected: Ok(2); the reset tokens report AlreadyUsed, the verification token still works
#[tokio::test]
async fn invalidates_only_matching_type() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let vault = TokenVault::new(db);

    let first = vault
        .issue(user.id, TokenType::PasswordReset, TimeDelta::minutes(30), meta())
        .await?;
    vault
        .issue(user.id, TokenType::PasswordReset, TimeDelta::minutes(30), meta())
        .await?;
    let verification = vault
        .issue(
            user.id,
            TokenType::EmailVerification,
            TimeDelta::seconds(900),
            meta(),
        )
        .await?;

    let invalidated = vault
        .invalidate_all(user.id, TokenType::PasswordReset)
        .await?;
    assert_eq!(invalidated, 2);

    let result = vault
        .consume(&first.plaintext, TokenType::PasswordReset)
        .await;
    assert!(matches!(
        result,
        Err(AppError::TokenErr(TokenError::AlreadyUsed))
    ));

    vault
        .consume(&verification.plaintext, TokenType::EmailVerification)
        .await?;

    Ok(())
}

/// Tests that other users' tokens are untouched.
///
/// Expected: Ok(0) for a user without tokens; the other user's token still consumes
#[tokio::test]
async fn leaves_other_users_alone() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let vault = TokenVault::new(db);

    let issued = vault
        .issue(other.id, TokenType::PasswordReset, TimeDelta::minutes(30), meta())
        .await?;

    let invalidated = vault
        .invalidate_all(user.id, TokenType::PasswordReset)
        .await?;
    assert_eq!(invalidated, 0);

    vault
        .consume(&issued.plaintext, TokenType::PasswordReset)
        .await?;

    Ok(())
}
