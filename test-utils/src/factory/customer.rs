//! Customer factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a customer record linked to a person and a login user.
///
/// # Arguments
/// - `db` - Database connection
/// - `person_id` - Person the customer represents
/// - `user_id` - Login user the customer maps back to
///
/// # Returns
/// - `Ok(entity::customer::Model)` - Created customer entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_customer(
    db: &DatabaseConnection,
    person_id: i32,
    user_id: i32,
) -> Result<entity::customer::Model, DbErr> {
    entity::customer::ActiveModel {
        person_id: ActiveValue::Set(person_id),
        user_id: ActiveValue::Set(user_id),
        ..Default::default()
    }
    .insert(db)
    .await
}
