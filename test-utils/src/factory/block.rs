//! Block factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an active maintenance block on a court.
///
/// # Arguments
/// - `db` - Database connection
/// - `court_id` - Court being blocked
/// - `starts_at` / `ends_at` - Half-open interval of the block
///
/// # Returns
/// - `Ok(entity::block::Model)` - Created block entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_block(
    db: &DatabaseConnection,
    court_id: i32,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> Result<entity::block::Model, DbErr> {
    let now = Utc::now();
    entity::block::ActiveModel {
        court_id: ActiveValue::Set(court_id),
        starts_at: ActiveValue::Set(starts_at),
        ends_at: ActiveValue::Set(ends_at),
        reason: ActiveValue::Set(Some("Maintenance".to_string())),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        deleted_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
