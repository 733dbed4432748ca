//! Reservation factory for seeding reservations directly, bypassing the booking checks.

use chrono::{DateTime, Duration, Utc};
use entity::sea_orm_active_enums::ReservationStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test reservations.
///
/// Inserts rows as-is; use it to set up state, not to exercise the conflict check.
pub struct ReservationFactory<'a> {
    db: &'a DatabaseConnection,
    court_id: i32,
    customer_id: i32,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    status: ReservationStatus,
    deleted_at: Option<DateTime<Utc>>,
}

impl<'a> ReservationFactory<'a> {
    /// Creates a new ReservationFactory.
    ///
    /// Defaults to a confirmed one-hour slot starting in two hours.
    pub fn new(db: &'a DatabaseConnection, court_id: i32, customer_id: i32) -> Self {
        let starts_at = Utc::now() + Duration::hours(2);
        Self {
            db,
            court_id,
            customer_id,
            starts_at,
            ends_at: starts_at + Duration::hours(1),
            status: ReservationStatus::Confirmed,
            deleted_at: None,
        }
    }

    /// Sets the half-open interval `[starts_at, ends_at)`.
    pub fn interval(mut self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        self
    }

    /// Sets the lifecycle status.
    pub fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Marks the reservation as cancelled and soft-deleted.
    pub fn cancelled(mut self) -> Self {
        self.status = ReservationStatus::Cancelled;
        self.deleted_at = Some(Utc::now());
        self
    }

    /// Builds and inserts the reservation.
    pub async fn build(self) -> Result<entity::reservation::Model, DbErr> {
        let now = Utc::now();
        entity::reservation::ActiveModel {
            court_id: ActiveValue::Set(self.court_id),
            customer_id: ActiveValue::Set(self.customer_id),
            starts_at: ActiveValue::Set(self.starts_at),
            ends_at: ActiveValue::Set(self.ends_at),
            amount_base: ActiveValue::Set(1000),
            amount_extra: ActiveValue::Set(0),
            amount_total: ActiveValue::Set(1000),
            requires_approval: ActiveValue::Set(false),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(self.deleted_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
