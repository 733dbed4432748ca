//! Ownership lookups behind access scoping.
//!
//! There is exactly one ownership chain per side:
//! - venue side: `user -> person -> venue.owner_person_id`
//! - customer side: `user -> customer.user_id`
//!
//! Every scope decision resolves through these lookups and nothing else.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};

use crate::server::model::scope::ResourceOwnership;

pub struct OwnershipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OwnershipRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the ids of all venues owned by the user's person record.
    ///
    /// # Returns
    /// - `Ok(Vec<i32>)` - Owned venue ids, empty when the user has no person record or venues
    /// - `Err(DbErr)` - Database error
    pub async fn venue_ids_owned_by_user(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        let Some(person) = entity::prelude::Person::find()
            .filter(entity::person::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(Vec::new());
        };

        entity::prelude::Venue::find()
            .select_only()
            .column(entity::venue::Column::Id)
            .filter(entity::venue::Column::OwnerPersonId.eq(person.id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Gets the customer record id linked to the user, if any.
    pub async fn customer_id_for_user(&self, user_id: i32) -> Result<Option<i32>, DbErr> {
        entity::prelude::Customer::find()
            .select_only()
            .column(entity::customer::Column::Id)
            .filter(entity::customer::Column::UserId.eq(user_id))
            .into_tuple::<i32>()
            .one(self.db)
            .await
    }

    pub async fn customer_exists(&self, customer_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Customer::find()
            .filter(entity::customer::Column::Id.eq(customer_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets the login email of the user behind a customer record.
    pub async fn customer_email(&self, customer_id: i32) -> Result<Option<String>, DbErr> {
        let result = entity::prelude::Customer::find_by_id(customer_id)
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await?;

        Ok(result.and_then(|(_, user)| user).map(|user| user.email))
    }

    /// Gets the venue a court belongs to.
    pub async fn venue_of_court(&self, court_id: i32) -> Result<Option<i32>, DbErr> {
        entity::prelude::Court::find_by_id(court_id)
            .select_only()
            .column(entity::court::Column::VenueId)
            .into_tuple::<i32>()
            .one(self.db)
            .await
    }

    /// Resolves where a reservation belongs, including cancelled ones.
    pub async fn reservation_ownership(
        &self,
        reservation_id: i32,
    ) -> Result<Option<ResourceOwnership>, DbErr> {
        let Some(reservation) = entity::prelude::Reservation::find_by_id(reservation_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self
            .venue_of_court(reservation.court_id)
            .await?
            .map(|venue_id| ResourceOwnership {
                venue_id,
                customer_id: Some(reservation.customer_id),
            }))
    }

    /// Resolves where a block belongs, including removed ones.
    pub async fn block_ownership(&self, block_id: i32) -> Result<Option<ResourceOwnership>, DbErr> {
        let Some(block) = entity::prelude::Block::find_by_id(block_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self
            .venue_of_court(block.court_id)
            .await?
            .map(|venue_id| ResourceOwnership {
                venue_id,
                customer_id: None,
            }))
    }

    pub async fn court_ownership(&self, court_id: i32) -> Result<Option<ResourceOwnership>, DbErr> {
        Ok(self
            .venue_of_court(court_id)
            .await?
            .map(|venue_id| ResourceOwnership {
                venue_id,
                customer_id: None,
            }))
    }

    /// Resolves where a cancellation belongs through its reservation.
    pub async fn cancellation_ownership(
        &self,
        cancellation_id: i32,
    ) -> Result<Option<ResourceOwnership>, DbErr> {
        let Some((cancellation, Some(reservation))) =
            entity::prelude::Cancellation::find_by_id(cancellation_id)
                .find_also_related(entity::prelude::Reservation)
                .one(self.db)
                .await?
        else {
            return Ok(None);
        };

        Ok(self
            .venue_of_court(reservation.court_id)
            .await?
            .map(|venue_id| ResourceOwnership {
                venue_id,
                customer_id: Some(cancellation.customer_id),
            }))
    }
}
