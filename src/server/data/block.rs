use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{scope::ScopedEntity, soft_delete::SoftDeletable},
    model::{
        block::{Block, GetBlocksParam, NewBlock, PaginatedBlocks},
        scope::Scope,
    },
};

pub struct BlockRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BlockRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a block. The caller must already hold the court lock and have checked the
    /// interval for conflicts.
    pub async fn create(&self, block: NewBlock) -> Result<Block, DbErr> {
        let now = Utc::now();

        let model = entity::block::ActiveModel {
            court_id: ActiveValue::Set(block.court_id),
            starts_at: ActiveValue::Set(block.slot.starts_at()),
            ends_at: ActiveValue::Set(block.slot.ends_at()),
            reason: ActiveValue::Set(block.reason),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Block::from_entity(model))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Block>, DbErr> {
        let model = entity::prelude::Block::find_by_id(id).one(self.db).await?;

        Ok(model.map(Block::from_entity))
    }

    /// Soft-deletes an active block, freeing its interval.
    ///
    /// # Returns
    /// - `Ok(true)` - Block removed by this call
    /// - `Ok(false)` - Block missing or already removed
    /// - `Err(DbErr)` - Database error
    pub async fn remove(&self, id: i32, removed_at: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::Block::update_many()
            .col_expr(entity::block::Column::DeletedAt, Expr::value(removed_at))
            .col_expr(entity::block::Column::UpdatedAt, Expr::value(removed_at))
            .filter(entity::block::Column::Id.eq(id))
            .filter(entity::block::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets a page of active blocks within `scope`, ordered by start time.
    pub async fn get_paginated(
        &self,
        scope: &Scope,
        param: &GetBlocksParam,
    ) -> Result<PaginatedBlocks, DbErr> {
        let mut query = entity::prelude::Block::active()
            .filter(entity::prelude::Block::scope_condition(scope));

        if let Some(court_id) = param.court_id {
            query = query.filter(entity::block::Column::CourtId.eq(court_id));
        }

        let paginator = query
            .order_by_asc(entity::block::Column::StartsAt)
            .order_by_asc(entity::block::Column::Id)
            .paginate(self.db, param.per_page);

        let total = paginator.num_items().await?;
        let blocks = paginator
            .fetch_page(param.page)
            .await?
            .into_iter()
            .map(Block::from_entity)
            .collect();

        Ok(PaginatedBlocks {
            blocks,
            total,
            page: param.page,
            per_page: param.per_page,
        })
    }
}
