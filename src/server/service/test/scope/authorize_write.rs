use super::*;

/// Tests that a customer may book for their own customer record.
///
/// Expected: Ok(())
#[tokio::test]
async fn customer_creates_own_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let identity = identity_of(db, customer.user.id).await;

    AccessScopeResolver::new(db)
        .authorize_write(
            &identity,
            ResourceKind::Reservation,
            WriteAction::Create(CreateSubject {
                court_id: owner.court.id,
                customer_id: Some(customer.customer.id),
            }),
        )
        .await?;

    Ok(())
}

/// Tests that a customer cannot book on behalf of someone else.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn customer_cannot_book_for_other_customer() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let other = factory::helpers::create_customer_account(db).await?;
    let identity = identity_of(db, customer.user.id).await;

    let result = AccessScopeResolver::new(db)
        .authorize_write(
            &identity,
            ResourceKind::Reservation,
            WriteAction::Create(CreateSubject {
                court_id: owner.court.id,
                customer_id: Some(other.customer.id),
            }),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests creating a reservation on a court that does not exist.
///
/// Expected: Err(NotFound) before any role check
#[tokio::test]
async fn create_on_missing_court_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::helpers::create_customer_account(db).await?;
    let identity = identity_of(db, customer.user.id).await;

    let result = AccessScopeResolver::new(db)
        .authorize_write(
            &identity,
            ResourceKind::Reservation,
            WriteAction::Create(CreateSubject {
                court_id: 555,
                customer_id: Some(customer.customer.id),
            }),
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that owners may block their own courts but not others'.
///
/// Expected: Ok(()) for the own court, Err(Forbidden) for the foreign court
#[tokio::test]
async fn owner_blocks_only_own_courts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let other_owner = factory::helpers::create_owner_with_court(db).await?;
    let identity = identity_of(db, owner.user.id).await;

    let resolver = AccessScopeResolver::new(db);
    resolver
        .authorize_write(
            &identity,
            ResourceKind::Block,
            WriteAction::Create(CreateSubject {
                court_id: owner.court.id,
                customer_id: None,
            }),
        )
        .await?;

    let result = resolver
        .authorize_write(
            &identity,
            ResourceKind::Block,
            WriteAction::Create(CreateSubject {
                court_id: other_owner.court.id,
                customer_id: None,
            }),
        )
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests that owners cannot create reservations.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn owner_cannot_create_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let identity = identity_of(db, owner.user.id).await;

    let result = AccessScopeResolver::new(db)
        .authorize_write(
            &identity,
            ResourceKind::Reservation,
            WriteAction::Create(CreateSubject {
                court_id: owner.court.id,
                customer_id: Some(customer.customer.id),
            }),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests that only the venue owner or an administrator approves reservations.
///
/// Expected: Ok(()) for owner and admin, Err(Forbidden) for the booking customer
#[tokio::test]
async fn approval_limited_to_venue_owner_and_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let admin = factory::helpers::create_admin(db).await?;
    let reservation =
        factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
            .build()
            .await?;

    let resolver = AccessScopeResolver::new(db);
    let action = WriteAction::Approve(reservation.id);

    resolver
        .authorize_write(&identity_of(db, owner.user.id).await, ResourceKind::Reservation, action)
        .await?;
    resolver
        .authorize_write(&identity_of(db, admin.id).await, ResourceKind::Reservation, action)
        .await?;

    let result = resolver
        .authorize_write(
            &identity_of(db, customer.user.id).await,
            ResourceKind::Reservation,
            action,
        )
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests that customers may update and delete their own reservations only.
///
/// Expected: Ok(()) for own, Err(Forbidden) for another customer's
#[tokio::test]
async fn customer_modifies_only_own_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let other = factory::helpers::create_customer_account(db).await?;
    let own = factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
        .interval(at(10), at(11))
        .build()
        .await?;
    let foreign = factory::reservation::ReservationFactory::new(db, owner.court.id, other.customer.id)
        .interval(at(12), at(13))
        .build()
        .await?;
    let identity = identity_of(db, customer.user.id).await;

    let resolver = AccessScopeResolver::new(db);
    resolver
        .authorize_write(&identity, ResourceKind::Reservation, WriteAction::Update(own.id))
        .await?;
    resolver
        .authorize_write(&identity, ResourceKind::Reservation, WriteAction::Delete(own.id))
        .await?;

    let result = resolver
        .authorize_write(
            &identity,
            ResourceKind::Reservation,
            WriteAction::Delete(foreign.id),
        )
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests that cancellations are never created directly by customers.
///
/// Expected: Err(Forbidden) for a customer creating a cancellation
#[tokio::test]
async fn cancellations_not_created_directly() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let identity = identity_of(db, customer.user.id).await;

    let result = AccessScopeResolver::new(db)
        .authorize_write(
            &identity,
            ResourceKind::Cancellation,
            WriteAction::Create(CreateSubject {
                court_id: owner.court.id,
                customer_id: Some(customer.customer.id),
            }),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}
