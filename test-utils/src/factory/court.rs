//! Court factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a court inside the given venue.
///
/// # Arguments
/// - `db` - Database connection
/// - `venue_id` - Venue the court belongs to
///
/// # Returns
/// - `Ok(entity::court::Model)` - Created court entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_court(
    db: &DatabaseConnection,
    venue_id: i32,
) -> Result<entity::court::Model, DbErr> {
    entity::court::ActiveModel {
        venue_id: ActiveValue::Set(venue_id),
        name: ActiveValue::Set(format!("Court {}", next_id())),
        updated_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a court with an explicit id.
///
/// Useful for scenario tests that refer to a court by a well-known number.
pub async fn create_court_with_id(
    db: &DatabaseConnection,
    id: i32,
    venue_id: i32,
) -> Result<entity::court::Model, DbErr> {
    entity::court::ActiveModel {
        id: ActiveValue::Set(id),
        venue_id: ActiveValue::Set(venue_id),
        name: ActiveValue::Set(format!("Court {}", id)),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
