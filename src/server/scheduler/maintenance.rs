use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::{auth_token::AuthTokenRepository, reservation::ReservationRepository},
    error::AppError,
};

/// How long consumed or expired recovery tokens are kept before being purged.
const TOKEN_RETENTION_DAYS: i64 = 7;

/// Starts the maintenance scheduler
///
/// Runs two jobs:
/// - every minute, confirmed reservations whose end has passed become completed
/// - daily at 03:00 UTC, recovery tokens that stopped being usable a week ago are purged
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let completion_db = db.clone();
    let completion_job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = completion_db.clone();

        Box::pin(async move {
            if let Err(e) = complete_elapsed_reservations(&db).await {
                tracing::error!("Error completing elapsed reservations: {}", e);
            }
        })
    })?;

    let purge_db = db.clone();
    let purge_job = Job::new_async("0 0 3 * * *", move |_uuid, _lock| {
        let db = purge_db.clone();

        Box::pin(async move {
            if let Err(e) = purge_stale_tokens(&db).await {
                tracing::error!("Error purging stale recovery tokens: {}", e);
            }
        })
    })?;

    scheduler.add(completion_job).await?;
    scheduler.add(purge_job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(())
}

/// Marks confirmed reservations that have ended as completed.
pub async fn complete_elapsed_reservations(db: &DatabaseConnection) -> Result<u64, AppError> {
    let completed = ReservationRepository::new(db)
        .complete_elapsed(Utc::now())
        .await?;

    if completed > 0 {
        tracing::info!("Marked {} reservations as completed", completed);
    }

    Ok(completed)
}

/// Deletes recovery tokens consumed or expired more than a week ago.
pub async fn purge_stale_tokens(db: &DatabaseConnection) -> Result<u64, AppError> {
    let cutoff = Utc::now() - Duration::days(TOKEN_RETENTION_DAYS);
    let purged = AuthTokenRepository::new(db).delete_stale(cutoff).await?;

    if purged > 0 {
        tracing::info!("Purged {} stale recovery tokens", purged);
    }

    Ok(purged)
}
