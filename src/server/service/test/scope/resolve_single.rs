use super::*;

/// Tests that an owner can reach a reservation on their court.
///
/// Expected: Ok(ResourceOwnership) naming the owner's venue
#[tokio::test]
async fn owner_reaches_reservation_on_own_court() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let reservation =
        factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
            .build()
            .await?;
    let identity = identity_of(db, owner.user.id).await;

    let ownership = AccessScopeResolver::new(db)
        .resolve_single(&identity, ResourceKind::Reservation, reservation.id)
        .await?;

    assert_eq!(ownership.venue_id, owner.venue.id);
    assert_eq!(ownership.customer_id, Some(customer.customer.id));

    Ok(())
}

/// Tests that another owner's reservation is out of scope.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn owner_cannot_reach_other_venue() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let other_owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let reservation =
        factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
            .build()
            .await?;
    let identity = identity_of(db, other_owner.user.id).await;

    let result = AccessScopeResolver::new(db)
        .resolve_single(&identity, ResourceKind::Reservation, reservation.id)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests that customers only reach their own reservations.
///
/// Expected: Ok for the own reservation, Err(Forbidden) for another customer's
#[tokio::test]
async fn customer_reaches_only_own_reservations() -> Result<(), AppError> {
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
    assert!(resolver
        .resolve_single(&identity, ResourceKind::Reservation, own.id)
        .await
        .is_ok());

    let result = resolver
        .resolve_single(&identity, ResourceKind::Reservation, foreign.id)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests that a missing resource is reported as missing, even to administrators.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_resource_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::helpers::create_admin(db).await?;
    let identity = identity_of(db, admin.id).await;

    let result = AccessScopeResolver::new(db)
        .resolve_single(&identity, ResourceKind::Block, 31337)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that courts resolve through their venue only.
///
/// Expected: Ok for the owning owner, Err(Forbidden) for a customer
#[tokio::test]
async fn court_resolves_through_venue() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let resolver = AccessScopeResolver::new(db);

    let ownership = resolver
        .resolve_single(
            &identity_of(db, owner.user.id).await,
            ResourceKind::Court,
            owner.court.id,
        )
        .await?;
    let denied = resolver
        .resolve_single(
            &identity_of(db, customer.user.id).await,
            ResourceKind::Court,
            owner.court.id,
        )
        .await;

    assert_eq!(ownership.venue_id, owner.venue.id);
    assert_eq!(ownership.customer_id, None);
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    Ok(())
}
