//! Shared helper utilities for factory methods.
//!
//! Provides ID generation plus convenience methods for creating the ownership chains
//! (user → person → venue → court, user → person → customer) most tests need.

use entity::sea_orm_active_enums::Role;
use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// An owner account together with the venue and court it owns.
pub struct OwnerWithCourt {
    pub user: entity::user::Model,
    pub person: entity::person::Model,
    pub venue: entity::venue::Model,
    pub court: entity::court::Model,
}

/// A customer account with its person and customer records.
pub struct CustomerAccount {
    pub user: entity::user::Model,
    pub person: entity::person::Model,
    pub customer: entity::customer::Model,
}

/// Creates a DUENIO user owning one venue with one court.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(OwnerWithCourt)` - The created chain of entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_owner_with_court(db: &DatabaseConnection) -> Result<OwnerWithCourt, DbErr> {
    let user = crate::factory::user::UserFactory::new(db)
        .role(Role::Duenio)
        .build()
        .await?;
    let person = crate::factory::person::create_person(db, user.id).await?;
    let venue = crate::factory::venue::create_venue(db, person.id).await?;
    let court = crate::factory::court::create_court(db, venue.id).await?;

    Ok(OwnerWithCourt {
        user,
        person,
        venue,
        court,
    })
}

/// Creates a CLIENTE user with its person and customer records.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(CustomerAccount)` - The created chain of entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_customer_account(db: &DatabaseConnection) -> Result<CustomerAccount, DbErr> {
    let user = crate::factory::user::UserFactory::new(db)
        .role(Role::Cliente)
        .build()
        .await?;
    let person = crate::factory::person::create_person(db, user.id).await?;
    let customer = crate::factory::customer::create_customer(db, person.id, user.id).await?;

    Ok(CustomerAccount {
        user,
        person,
        customer,
    })
}

/// Creates an ADMIN user with no person record.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    crate::factory::user::UserFactory::new(db)
        .role(Role::Admin)
        .build()
        .await
}
