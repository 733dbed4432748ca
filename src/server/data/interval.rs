//! Overlap queries shared by every entity that occupies time on a court.

use sea_orm::{ColumnTrait, QueryFilter, QueryOrder, Select};

use crate::server::{
    data::soft_delete::SoftDeletable,
    model::slot::{SlotKind, TimeSlot},
};

/// An entity whose rows occupy a half-open interval on a court.
pub trait CourtInterval: SoftDeletable {
    const KIND: SlotKind;

    fn id_column() -> Self::Column;
    fn court_column() -> Self::Column;
    fn starts_at_column() -> Self::Column;
    fn ends_at_column() -> Self::Column;
    fn model_id(model: &Self::Model) -> i32;

    /// Selects active rows on `court_id` whose interval overlaps `slot`.
    ///
    /// Uses strict comparisons on both ends, so touching intervals are not returned.
    fn active_overlapping(court_id: i32, slot: &TimeSlot, exclude_id: Option<i32>) -> Select<Self> {
        let mut query = Self::active()
            .filter(Self::court_column().eq(court_id))
            .filter(Self::starts_at_column().lt(slot.ends_at()))
            .filter(Self::ends_at_column().gt(slot.starts_at()));

        if let Some(id) = exclude_id {
            query = query.filter(Self::id_column().ne(id));
        }

        query.order_by_asc(Self::starts_at_column())
    }
}

impl CourtInterval for entity::reservation::Entity {
    const KIND: SlotKind = SlotKind::Reservation;

    fn id_column() -> Self::Column {
        entity::reservation::Column::Id
    }

    fn court_column() -> Self::Column {
        entity::reservation::Column::CourtId
    }

    fn starts_at_column() -> Self::Column {
        entity::reservation::Column::StartsAt
    }

    fn ends_at_column() -> Self::Column {
        entity::reservation::Column::EndsAt
    }

    fn model_id(model: &Self::Model) -> i32 {
        model.id
    }
}

impl CourtInterval for entity::block::Entity {
    const KIND: SlotKind = SlotKind::Block;

    fn id_column() -> Self::Column {
        entity::block::Column::Id
    }

    fn court_column() -> Self::Column {
        entity::block::Column::CourtId
    }

    fn starts_at_column() -> Self::Column {
        entity::block::Column::StartsAt
    }

    fn ends_at_column() -> Self::Column {
        entity::block::Column::EndsAt
    }

    fn model_id(model: &Self::Model) -> i32 {
        model.id
    }
}
