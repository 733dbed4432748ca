use super::*;

/// Tests cancelling a reservation.
///
/// Verifies the cancellation row is recorded with the reservation's customer and the
/// reservation itself is soft-deleted.
///
/// Expected: Ok(CancelledReservation) carrying the committed reservation
#[tokio::test]
async fn records_cancellation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let booked = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 10, 12))
        .await?;

    let cancelled = ledger
        .cancel_reservation(CancelReservationParam {
            reservation_id: booked.id,
            reason: Some("Rain".to_string()),
            channel: Some("web".to_string()),
        })
        .await?;
    let cancellation = &cancelled.cancellation;

    assert_eq!(cancelled.reservation.id, booked.id);
    assert!(cancelled.reservation.is_cancelled());
    assert_eq!(cancelled.reservation.status, ReservationStatus::Cancelled);
    assert_eq!(cancellation.reservation_id, booked.id);
    assert_eq!(cancellation.customer_id, customer.customer.id);
    assert_eq!(cancellation.reason.as_deref(), Some("Rain"));

    let stored = crate::server::data::reservation::ReservationRepository::new(db)
        .find_by_id(booked.id)
        .await?
        .unwrap();
    assert!(stored.is_cancelled());
    assert_eq!(stored.status, ReservationStatus::Cancelled);

    Ok(())
}

/// Tests that cancelling frees the interval for a new booking.
///
/// Expected: Ok(Reservation) on the previously taken interval
#[tokio::test]
async fn frees_interval() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let booked = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 10, 12))
        .await?;

    ledger
        .cancel_reservation(CancelReservationParam {
            reservation_id: booked.id,
            ..Default::default()
        })
        .await?;

    let rebooked = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 10, 12))
        .await?;
    assert_ne!(rebooked.id, booked.id);

    Ok(())
}

/// Tests cancelling the same reservation twice.
///
/// Expected: Err(AlreadyCancelled) on the second attempt
#[tokio::test]
async fn fails_when_already_cancelled() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let booked = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 10, 12))
        .await?;

    let param = CancelReservationParam {
        reservation_id: booked.id,
        ..Default::default()
    };
    ledger.cancel_reservation(param.clone()).await?;

    let result = ledger.cancel_reservation(param).await;
    assert!(matches!(result, Err(AppError::AlreadyCancelled(id)) if id == booked.id));

    Ok(())
}

/// Tests cancelling a reservation that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_missing_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = TimeSlotLedger::new(db, DEADLINE)
        .cancel_reservation(CancelReservationParam {
            reservation_id: 77,
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
