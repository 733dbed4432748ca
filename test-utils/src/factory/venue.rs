//! Venue factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a venue owned by the given person.
///
/// # Arguments
/// - `db` - Database connection
/// - `owner_person_id` - Person owning the venue
///
/// # Returns
/// - `Ok(entity::venue::Model)` - Created venue entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_venue(
    db: &DatabaseConnection,
    owner_person_id: i32,
) -> Result<entity::venue::Model, DbErr> {
    entity::venue::ActiveModel {
        owner_person_id: ActiveValue::Set(owner_person_id),
        name: ActiveValue::Set(format!("Venue {}", next_id())),
        ..Default::default()
    }
    .insert(db)
    .await
}
