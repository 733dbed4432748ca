use super::*;

/// Tests that customers only list their own reservations.
///
/// Expected: Ok(PaginatedReservations) holding one reservation
#[tokio::test]
async fn customer_lists_own_reservations() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let other = factory::helpers::create_customer_account(db).await?;

    let own = factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
        .interval(at(10), at(11))
        .build()
        .await?;
    factory::reservation::ReservationFactory::new(db, owner.court.id, other.customer.id)
        .interval(at(12), at(13))
        .build()
        .await?;

    let identity = identity_of(db, customer.user.id).await;
    let mailer = mailer();

    let page = ReservationService::new(db, &mailer, DEADLINE)
        .list(&identity, list_param(None))
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.reservations[0].id, own.id);

    Ok(())
}

/// Tests that owners list reservations on their courts only, ordered by start.
///
/// Expected: Ok(PaginatedReservations) with the owner's two reservations in start order
#[tokio::test]
async fn owner_lists_own_courts_in_start_order() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let other_owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    let late = factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
        .interval(at(15), at(16))
        .build()
        .await?;
    let early = factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
        .interval(at(9), at(10))
        .build()
        .await?;
    factory::reservation::ReservationFactory::new(db, other_owner.court.id, customer.customer.id)
        .interval(at(9), at(10))
        .build()
        .await?;

    let identity = identity_of(db, owner.user.id).await;
    let mailer = mailer();

    let page = ReservationService::new(db, &mailer, DEADLINE)
        .list(&identity, list_param(None))
        .await?;

    let ids: Vec<i32> = page.reservations.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![early.id, late.id]);

    Ok(())
}

/// Tests that cancelled reservations are hidden unless requested.
///
/// Expected: total 1 by default and 2 with `include_cancelled`
#[tokio::test]
async fn hides_cancelled_by_default() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
        .interval(at(10), at(11))
        .build()
        .await?;
    factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
        .interval(at(12), at(13))
        .cancelled()
        .build()
        .await?;

    let admin = factory::helpers::create_admin(db).await?;
    let identity = identity_of(db, admin.id).await;
    let mailer = mailer();
    let service = ReservationService::new(db, &mailer, DEADLINE);

    let active = service.list(&identity, list_param(None)).await?;
    assert_eq!(active.total, 1);

    let mut param = list_param(None);
    param.include_cancelled = true;
    let all = service.list(&identity, param).await?;
    assert_eq!(all.total, 2);

    Ok(())
}

/// Tests paging and the court filter.
///
/// Expected: 3 matching rows split over pages of 2
#[tokio::test]
async fn pages_filtered_results() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let second_court = factory::create_court(db, owner.venue.id).await?;
    let customer = factory::helpers::create_customer_account(db).await?;

    for hour in [8, 10, 12] {
        factory::reservation::ReservationFactory::new(db, owner.court.id, customer.customer.id)
            .interval(at(hour), at(hour + 1))
            .build()
            .await?;
    }
    factory::reservation::ReservationFactory::new(db, second_court.id, customer.customer.id)
        .interval(at(8), at(9))
        .build()
        .await?;

    let identity = identity_of(db, owner.user.id).await;
    let mailer = mailer();
    let service = ReservationService::new(db, &mailer, DEADLINE);

    let mut param = list_param(Some(owner.court.id));
    param.per_page = 2;
    let first = service.list(&identity, param.clone()).await?;

    param.page = 1;
    let second = service.list(&identity, param).await?;

    assert_eq!(first.total, 3);
    assert_eq!(first.reservations.len(), 2);
    assert_eq!(second.reservations.len(), 1);
    assert_eq!(second.reservations[0].starts_at, at(12));
    assert_eq!(first.into_dto().total_pages, 2);

    Ok(())
}

/// Tests fetching a single reservation out of scope.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn get_outside_scope_is_forbidden() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::helpers::create_owner_with_court(db).await?;
    let customer = factory::helpers::create_customer_account(db).await?;
    let other = factory::helpers::create_customer_account(db).await?;
    let foreign = factory::reservation::ReservationFactory::new(db, owner.court.id, other.customer.id)
        .build()
        .await?;

    let identity = identity_of(db, customer.user.id).await;
    let mailer = mailer();

    let result = ReservationService::new(db, &mailer, DEADLINE)
        .get(&identity, foreign.id)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}
