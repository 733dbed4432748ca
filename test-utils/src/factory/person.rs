//! Person factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a person linked to the given user.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Login user the person belongs to
///
/// # Returns
/// - `Ok(entity::person::Model)` - Created person entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_person(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::person::Model, DbErr> {
    entity::person::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        full_name: ActiveValue::Set(format!("Person {}", next_id())),
        ..Default::default()
    }
    .insert(db)
    .await
}
