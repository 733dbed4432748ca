use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::scope::ScopedEntity,
    model::{
        reservation::{CancelReservationParam, Cancellation},
        scope::Scope,
    },
};

pub struct CancellationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CancellationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records why and how a reservation was cancelled.
    ///
    /// `reservation_id` is unique, so a second record for the same reservation fails.
    pub async fn create(
        &self,
        customer_id: i32,
        param: CancelReservationParam,
        cancelled_at: DateTime<Utc>,
    ) -> Result<Cancellation, DbErr> {
        let model = entity::cancellation::ActiveModel {
            reservation_id: ActiveValue::Set(param.reservation_id),
            customer_id: ActiveValue::Set(customer_id),
            reason: ActiveValue::Set(param.reason),
            channel: ActiveValue::Set(param.channel),
            cancelled_at: ActiveValue::Set(cancelled_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Cancellation::from_entity(model))
    }

    /// Gets all cancellations within `scope`, most recent first.
    pub async fn get_all(&self, scope: &Scope) -> Result<Vec<Cancellation>, DbErr> {
        let models = entity::prelude::Cancellation::find()
            .filter(entity::prelude::Cancellation::scope_condition(scope))
            .order_by_desc(entity::cancellation::Column::CancelledAt)
            .all(self.db)
            .await?;

        Ok(models.into_iter().map(Cancellation::from_entity).collect())
    }
}
