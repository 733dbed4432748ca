//! Soft deletion for entities that keep their history.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};

/// An entity whose rows are retired by setting `deleted_at` rather than removed.
///
/// Every read that should ignore retired rows goes through [`SoftDeletable::active`].
pub trait SoftDeletable: EntityTrait {
    fn deleted_at_column() -> Self::Column;

    /// Selects rows that have not been soft-deleted.
    fn active() -> Select<Self> {
        Self::find().filter(Self::deleted_at_column().is_null())
    }
}

impl SoftDeletable for entity::reservation::Entity {
    fn deleted_at_column() -> Self::Column {
        entity::reservation::Column::DeletedAt
    }
}

impl SoftDeletable for entity::block::Entity {
    fn deleted_at_column() -> Self::Column {
        entity::block::Column::DeletedAt
    }
}
