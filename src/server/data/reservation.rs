use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{scope::ScopedEntity, soft_delete::SoftDeletable},
    model::{
        reservation::{
            Amounts, GetReservationsParam, NewReservation, PaginatedReservations, Reservation,
            ReservationStatus,
        },
        scope::Scope,
        slot::TimeSlot,
    },
};

pub struct ReservationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReservationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a reservation. The caller must already hold the court lock and have checked
    /// the interval for conflicts.
    pub async fn create(&self, reservation: NewReservation) -> Result<Reservation, DbErr> {
        let now = Utc::now();
        let status = ReservationStatus::initial(reservation.requires_approval);

        let model = entity::reservation::ActiveModel {
            court_id: ActiveValue::Set(reservation.court_id),
            customer_id: ActiveValue::Set(reservation.customer_id),
            starts_at: ActiveValue::Set(reservation.slot.starts_at()),
            ends_at: ActiveValue::Set(reservation.slot.ends_at()),
            amount_base: ActiveValue::Set(reservation.amounts.base()),
            amount_extra: ActiveValue::Set(reservation.amounts.extra()),
            amount_total: ActiveValue::Set(reservation.amounts.total()),
            requires_approval: ActiveValue::Set(reservation.requires_approval),
            status: ActiveValue::Set(status.into_entity()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Reservation::from_entity(model))
    }

    /// Finds a reservation by id, including cancelled ones.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Reservation>, DbErr> {
        let model = entity::prelude::Reservation::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(model.map(Reservation::from_entity))
    }

    /// Rewrites the interval and amounts of an active reservation.
    ///
    /// # Returns
    /// - `Ok(true)` - Row updated
    /// - `Ok(false)` - Reservation was cancelled or completed in the meantime
    /// - `Err(DbErr)` - Database error
    pub async fn reschedule(
        &self,
        id: i32,
        slot: &TimeSlot,
        amounts: &Amounts,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Reservation::update_many()
            .col_expr(entity::reservation::Column::StartsAt, Expr::value(slot.starts_at()))
            .col_expr(entity::reservation::Column::EndsAt, Expr::value(slot.ends_at()))
            .col_expr(entity::reservation::Column::AmountBase, Expr::value(amounts.base()))
            .col_expr(entity::reservation::Column::AmountExtra, Expr::value(amounts.extra()))
            .col_expr(entity::reservation::Column::AmountTotal, Expr::value(amounts.total()))
            .col_expr(entity::reservation::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::reservation::Column::Id.eq(id))
            .filter(entity::reservation::Column::DeletedAt.is_null())
            .filter(entity::reservation::Column::Status.is_in(occupying_statuses()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Soft-deletes an active reservation and marks it cancelled.
    ///
    /// # Returns
    /// - `Ok(true)` - Reservation cancelled by this call
    /// - `Ok(false)` - Reservation was not active anymore
    /// - `Err(DbErr)` - Database error
    pub async fn cancel(&self, id: i32, cancelled_at: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::Reservation::update_many()
            .col_expr(entity::reservation::Column::DeletedAt, Expr::value(cancelled_at))
            .col_expr(
                entity::reservation::Column::Status,
                Expr::value(ReservationStatus::Cancelled.into_entity()),
            )
            .col_expr(entity::reservation::Column::UpdatedAt, Expr::value(cancelled_at))
            .filter(entity::reservation::Column::Id.eq(id))
            .filter(entity::reservation::Column::DeletedAt.is_null())
            .filter(entity::reservation::Column::Status.is_in(occupying_statuses()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Moves a pending reservation to confirmed.
    ///
    /// # Returns
    /// - `Ok(true)` - Reservation confirmed by this call
    /// - `Ok(false)` - Reservation was not pending
    /// - `Err(DbErr)` - Database error
    pub async fn approve(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Reservation::update_many()
            .col_expr(
                entity::reservation::Column::Status,
                Expr::value(ReservationStatus::Confirmed.into_entity()),
            )
            .col_expr(entity::reservation::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::reservation::Column::Id.eq(id))
            .filter(entity::reservation::Column::DeletedAt.is_null())
            .filter(
                entity::reservation::Column::Status
                    .eq(ReservationStatus::Pending.into_entity()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks confirmed reservations that ended at or before `now` as completed.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of reservations completed
    /// - `Err(DbErr)` - Database error
    pub async fn complete_elapsed(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Reservation::update_many()
            .col_expr(
                entity::reservation::Column::Status,
                Expr::value(ReservationStatus::Completed.into_entity()),
            )
            .col_expr(entity::reservation::Column::UpdatedAt, Expr::value(now))
            .filter(entity::reservation::Column::DeletedAt.is_null())
            .filter(
                entity::reservation::Column::Status
                    .eq(ReservationStatus::Confirmed.into_entity()),
            )
            .filter(entity::reservation::Column::EndsAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Gets a page of reservations within `scope`, ordered by start time.
    pub async fn get_paginated(
        &self,
        scope: &Scope,
        param: &GetReservationsParam,
    ) -> Result<PaginatedReservations, DbErr> {
        let mut query = if param.include_cancelled {
            entity::prelude::Reservation::find()
        } else {
            entity::prelude::Reservation::active()
        }
        .filter(entity::prelude::Reservation::scope_condition(scope));

        if let Some(court_id) = param.court_id {
            query = query.filter(entity::reservation::Column::CourtId.eq(court_id));
        }

        let paginator = query
            .order_by_asc(entity::reservation::Column::StartsAt)
            .order_by_asc(entity::reservation::Column::Id)
            .paginate(self.db, param.per_page);

        let total = paginator.num_items().await?;
        let reservations = paginator
            .fetch_page(param.page)
            .await?
            .into_iter()
            .map(Reservation::from_entity)
            .collect();

        Ok(PaginatedReservations {
            reservations,
            total,
            page: param.page,
            per_page: param.per_page,
        })
    }
}

fn occupying_statuses() -> Vec<entity::sea_orm_active_enums::ReservationStatus> {
    vec![
        ReservationStatus::Pending.into_entity(),
        ReservationStatus::Confirmed.into_entity(),
    ]
}
