use super::*;

/// Tests placing a block on a free interval and that it then rejects reservations.
///
/// Expected: Ok(Block), then Err(Conflict { Block }) for an overlapping reservation
#[tokio::test]
async fn blocks_interval_for_reservations() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let block = ledger.place_block(new_block(owner.court.id, 8, 10)).await?;

    assert_eq!(block.court_id, owner.court.id);
    assert_eq!(block.reason.as_deref(), Some("Resurfacing"));

    let result = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 9, 11))
        .await;
    assert!(matches!(
        result,
        Err(AppError::Conflict { kind: SlotKind::Block, conflicting_id }) if conflicting_id == block.id
    ));

    Ok(())
}

/// Tests that a block cannot be placed over an active reservation.
///
/// Expected: Err(Conflict { Reservation })
#[tokio::test]
async fn rejects_overlap_with_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let booked = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 10, 12))
        .await?;

    let result = ledger.place_block(new_block(owner.court.id, 11, 14)).await;

    assert!(matches!(
        result,
        Err(AppError::Conflict { kind: SlotKind::Reservation, conflicting_id }) if conflicting_id == booked.id
    ));

    Ok(())
}

/// Tests that blocks conflict with each other.
///
/// Expected: Err(Conflict { Block })
#[tokio::test]
async fn rejects_overlap_with_block() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    ledger.place_block(new_block(owner.court.id, 8, 10)).await?;

    let result = ledger.place_block(new_block(owner.court.id, 9, 12)).await;

    assert!(matches!(
        result,
        Err(AppError::Conflict {
            kind: SlotKind::Block,
            ..
        })
    ));

    Ok(())
}

/// Tests that removing a block frees its interval.
///
/// Expected: Ok(()) then Ok(Reservation) on the freed interval
#[tokio::test]
async fn removal_frees_interval() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let block = ledger.place_block(new_block(owner.court.id, 8, 10)).await?;

    ledger.remove_block(block.id).await?;

    let result = ledger
        .book_reservation(new_reservation(owner.court.id, customer.customer.id, 8, 10))
        .await;
    assert!(result.is_ok());

    Ok(())
}

/// Tests removing a block twice.
///
/// Expected: Err(NotFound) on the second removal
#[tokio::test]
async fn removal_fails_when_already_removed() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;

    let ledger = TimeSlotLedger::new(db, DEADLINE);
    let block = ledger.place_block(new_block(owner.court.id, 8, 10)).await?;

    ledger.remove_block(block.id).await?;
    let result = ledger.remove_block(block.id).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
