use super::*;

/// Tests a customer booking a free slot for themselves.
///
/// Expected: Ok(Reservation) with status CONFIRMED
#[tokio::test]
async fn customer_books_free_slot() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let identity = identity_of(db, customer.user.id).await;
    let mailer = mailer();

    let reservation = ReservationService::new(db, &mailer, DEADLINE)
        .create(
            &identity,
            create_param(owner.court.id, customer.customer.id, 10, 12),
        )
        .await?;

    assert_eq!(reservation.customer_id, customer.customer.id);
    assert_eq!(reservation.amount_total, 3000);
    assert_eq!(reservation.status, ReservationStatus::Confirmed);

    Ok(())
}

/// Tests that invalid input is rejected before authorization.
///
/// Expected: Err(Validation) for an inverted interval and for a negative amount
#[tokio::test]
async fn rejects_invalid_input() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let identity = identity_of(db, customer.user.id).await;
    let mailer = mailer();
    let service = ReservationService::new(db, &mailer, DEADLINE);

    let inverted = service
        .create(
            &identity,
            create_param(owner.court.id, customer.customer.id, 12, 10),
        )
        .await;
    assert!(matches!(inverted, Err(AppError::Validation(_))));

    let mut negative = create_param(owner.court.id, customer.customer.id, 10, 12);
    negative.amount_extra = -1;
    let negative = service.create(&identity, negative).await;
    assert!(matches!(negative, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests that the booking is refused when the slot is taken.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_taken_slot() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let other = factory::helpers::create_customer_account(db).await?;
    factory::reservation::ReservationFactory::new(db, owner.court.id, other.customer.id)
        .interval(at(10), at(12))
        .build()
        .await?;

    let identity = identity_of(db, customer.user.id).await;
    let mailer = mailer();

    let result = ReservationService::new(db, &mailer, DEADLINE)
        .create(
            &identity,
            create_param(owner.court.id, customer.customer.id, 11, 12),
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));

    Ok(())
}

/// Tests that an administrator may book for any customer.
///
/// Expected: Ok(Reservation)
#[tokio::test]
async fn admin_books_for_customer() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let admin = factory::helpers::create_admin(db).await?;
    let identity = identity_of(db, admin.id).await;
    let mailer = mailer();

    let reservation = ReservationService::new(db, &mailer, DEADLINE)
        .create(
            &identity,
            create_param(owner.court.id, customer.customer.id, 10, 12),
        )
        .await?;

    assert_eq!(reservation.customer_id, customer.customer.id);

    Ok(())
}
