use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::block::BlockRepository,
    error::AppError,
    model::{
        block::{Block, CreateBlockParam, GetBlocksParam, PaginatedBlocks},
        identity::Identity,
        scope::{CreateSubject, ResourceKind, WriteAction},
    },
    service::{ledger::TimeSlotLedger, scope::AccessScopeResolver},
};

pub struct BlockService<'a> {
    db: &'a DatabaseConnection,
    deadline: Duration,
}

impl<'a> BlockService<'a> {
    pub fn new(db: &'a DatabaseConnection, deadline: Duration) -> Self {
        Self { db, deadline }
    }

    pub async fn list(
        &self,
        identity: &Identity,
        param: GetBlocksParam,
    ) -> Result<PaginatedBlocks, AppError> {
        let scope = AccessScopeResolver::new(self.db)
            .resolve_list(identity, ResourceKind::Block)
            .await?;

        Ok(BlockRepository::new(self.db)
            .get_paginated(&scope, &param)
            .await?)
    }

    /// Places a maintenance block on a court the identity's venue owns.
    pub async fn create(
        &self,
        identity: &Identity,
        param: CreateBlockParam,
    ) -> Result<Block, AppError> {
        let block = param.validate()?;

        AccessScopeResolver::new(self.db)
            .authorize_write(
                identity,
                ResourceKind::Block,
                WriteAction::Create(CreateSubject {
                    court_id: block.court_id,
                    customer_id: None,
                }),
            )
            .await?;

        let placed = TimeSlotLedger::new(self.db, self.deadline)
            .place_block(block)
            .await?;

        tracing::info!(
            "User {} blocked court {} from {} to {}",
            identity.user_id,
            placed.court_id,
            placed.starts_at,
            placed.ends_at
        );

        Ok(placed)
    }

    pub async fn remove(&self, identity: &Identity, id: i32) -> Result<(), AppError> {
        AccessScopeResolver::new(self.db)
            .authorize_write(identity, ResourceKind::Block, WriteAction::Delete(id))
            .await?;

        TimeSlotLedger::new(self.db, self.deadline)
            .remove_block(id)
            .await
    }
}
