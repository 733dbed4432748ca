use super::*;
use crate::server::{
    model::block::{CreateBlockParam, GetBlocksParam},
    service::block::BlockService,
};

fn block_param(court_id: i32, start: u32, end: u32) -> CreateBlockParam {
    CreateBlockParam {
        court_id,
        starts_at: at(start),
        ends_at: at(end),
        reason: None,
    }
}

fn list_param() -> GetBlocksParam {
    GetBlocksParam {
        court_id: None,
        page: 0,
        per_page: 10,
    }
}

/// Tests an owner placing, listing and removing a block on their court.
///
/// Expected: the block is listed after placement and gone after removal
#[tokio::test]
async fn owner_manages_blocks() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let identity = identity_of(db, owner.user.id).await;
    let service = BlockService::new(db, DEADLINE);

    let block = service
        .create(&identity, block_param(owner.court.id, 6, 8))
        .await?;

    let listed = service.list(&identity, list_param()).await?;
    assert_eq!(listed.total, 1);
    assert_eq!(listed.blocks[0].id, block.id);

    service.remove(&identity, block.id).await?;

    let listed = service.list(&identity, list_param()).await?;
    assert_eq!(listed.total, 0);

    Ok(())
}

/// Tests that owners cannot block courts of other venues.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn owner_cannot_block_foreign_court() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let other_owner = factory::helpers::create_owner_with_court(db).await?;
    let identity = identity_of(db, owner.user.id).await;

    let result = BlockService::new(db, DEADLINE)
        .create(&identity, block_param(other_owner.court.id, 6, 8))
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests that customers can neither place nor list blocks.
///
/// Expected: Err(Forbidden) for both
#[tokio::test]
async fn customer_has_no_block_access() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let identity = identity_of(db, customer.user.id).await;
    let service = BlockService::new(db, DEADLINE);

    let created = service
        .create(&identity, block_param(owner.court.id, 6, 8))
        .await;
    let listed = service.list(&identity, list_param()).await;

    assert!(matches!(created, Err(AppError::Forbidden(_))));
    assert!(matches!(listed, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests placing a block over a booked reservation.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn block_over_reservation_conflicts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
        .interval(at(7), at(9))
        .build()
        .await?;
    let identity = identity_of(db, owner.user.id).await;

    let result = BlockService::new(db, DEADLINE)
        .create(&identity, block_param(owner.court.id, 6, 8))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));

    Ok(())
}
