use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::scope::ScopedEntity,
    model::{court::Court, scope::Scope},
};

pub struct CourtRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CourtRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Takes the court-scoped write lock for the current transaction.
    ///
    /// Touches the court row, which holds a row lock on Postgres and the database write
    /// lock on SQLite until the transaction ends. Every interval write on the court goes
    /// through here first, so concurrent proposals for one court run one at a time.
    ///
    /// # Returns
    /// - `Ok(true)` - Lock held
    /// - `Ok(false)` - Court does not exist
    /// - `Err(DbErr)` - Database error
    pub async fn lock_for_booking(&self, court_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Court::update_many()
            .col_expr(entity::court::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::court::Column::Id.eq(court_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets the courts visible under `scope`, ordered by id.
    pub async fn find_in_scope(&self, scope: &Scope) -> Result<Vec<Court>, DbErr> {
        let models = entity::prelude::Court::find()
            .filter(entity::prelude::Court::scope_condition(scope))
            .order_by_asc(entity::court::Column::Id)
            .all(self.db)
            .await?;

        Ok(models.into_iter().map(Court::from_entity).collect())
    }
}
