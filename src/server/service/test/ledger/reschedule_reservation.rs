use super::*;

/// Tests moving a reservation onto a free interval.
///
/// Expected: Ok(Reservation) with the new interval and unchanged amounts
#[tokio::test]
async fn moves_to_free_interval() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let booked = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 10, 12))
        .await?;

    let moved = ledger
        .reschedule_reservation(&UpdateReservationParam {
            id: booked.id,
            starts_at: Some(at(14)),
            ends_at: Some(at(15)),
            ..Default::default()
        })
        .await?;

    assert_eq!(moved.starts_at, at(14));
    assert_eq!(moved.ends_at, at(15));
    assert_eq!(moved.amount_total, booked.amount_total);

    Ok(())
}

/// Tests that a reservation may overlap its own previous interval when moved.
///
/// Expected: Ok(Reservation) shifted by one hour
#[tokio::test]
async fn ignores_itself_when_moving() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let booked = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 10, 12))
        .await?;

    let moved = ledger
        .reschedule_reservation(&UpdateReservationParam {
            id: booked.id,
            starts_at: Some(at(11)),
            ends_at: Some(at(13)),
            ..Default::default()
        })
        .await?;

    assert_eq!(moved.starts_at, at(11));

    Ok(())
}

/// Tests moving a reservation onto another reservation's interval.
///
/// Expected: Err(Conflict) and the reservation keeps its interval
#[tokio::test]
async fn rejects_move_onto_taken_interval() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let first = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 10, 12))
        .await?;
    let second = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 14, 16))
        .await?;

    let result = ledger
        .reschedule_reservation(&UpdateReservationParam {
            id: second.id,
            starts_at: Some(at(11)),
            ..Default::default()
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::Conflict { kind: SlotKind::Reservation, conflicting_id }) if conflicting_id == first.id
    ));

    let unchanged = crate::server::data::reservation::ReservationRepository::new(db)
        .find_by_id(second.id)
        .await?
        .unwrap();
    assert_eq!(unchanged.starts_at, at(14));

    Ok(())
}

/// Tests an amounts-only update, which leaves the interval untouched.
///
/// Expected: Ok(Reservation) with the recomputed total
#[tokio::test]
async fn updates_amounts_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let booked = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 10, 12))
        .await?;

    let updated = ledger
        .reschedule_reservation(&UpdateReservationParam {
            id: booked.id,
            amount_extra: Some(1000),
            ..Default::default()
        })
        .await?;

    assert_eq!(updated.amount_base, 2000);
    assert_eq!(updated.amount_extra, 1000);
    assert_eq!(updated.amount_total, 3000);
    assert_eq!(updated.starts_at, at(10));

    Ok(())
}

/// Tests that a partial move producing an empty interval is rejected.
///
/// Expected: Err(Validation)
#[tokio::test]
async fn rejects_inverted_interval() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let booked = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 10, 12))
        .await?;

    let result = ledger
        .reschedule_reservation(&UpdateReservationParam {
            id: booked.id,
            starts_at: Some(at(12)),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests that cancelled reservations cannot be modified.
///
/// Expected: Err(AlreadyCancelled)
#[tokio::test]
async fn fails_for_cancelled_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let cancelled =
        factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
            .interval(at(10), at(12))
            .cancelled()
            .build()
            .await?;

    let result = TimeSlotLedger::new(db, DEADLINE)
        .reschedule_reservation(&UpdateReservationParam {
            id: cancelled.id,
            amount_base: Some(100),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::AlreadyCancelled(id)) if id == cancelled.id));

    Ok(())
}

/// Tests that completed reservations cannot be modified.
///
/// Expected: Err(Validation)
#[tokio::test]
async fn fails_for_completed_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let completed =
        factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
            .interval(at(10), at(12))
            .status(ReservationStatus::Completed.into_entity())
            .build()
            .await?;

    let result = TimeSlotLedger::new(db, DEADLINE)
        .reschedule_reservation(&UpdateReservationParam {
            id: completed.id,
            starts_at: Some(at(13)),
            ends_at: Some(at(14)),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests updating a reservation that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_missing_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = TimeSlotLedger::new(db, DEADLINE)
        .reschedule_reservation(&UpdateReservationParam {
            id: 4242,
            amount_base: Some(100),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
