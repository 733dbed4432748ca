//! Maintenance block domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::block::{BlockDto, CreateBlockDto, PaginatedBlocksDto},
    server::{error::AppError, model::slot::TimeSlot},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: i32,
    pub court_id: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Block {
    pub fn from_entity(entity: entity::block::Model) -> Self {
        Self {
            id: entity.id,
            court_id: entity.court_id,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            reason: entity.reason,
            created_at: entity.created_at,
            deleted_at: entity.deleted_at,
        }
    }

    pub fn into_dto(self) -> BlockDto {
        BlockDto {
            id: self.id,
            court_id: self.court_id,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            reason: self.reason,
            created_at: self.created_at,
        }
    }
}

/// A validated block ready to be written by the ledger.
#[derive(Debug, Clone)]
pub struct NewBlock {
    pub court_id: i32,
    pub slot: TimeSlot,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateBlockParam {
    pub court_id: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub reason: Option<String>,
}

impl CreateBlockParam {
    pub fn from_dto(dto: CreateBlockDto) -> Self {
        Self {
            court_id: dto.court_id,
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
            reason: dto.reason,
        }
    }

    pub fn validate(&self) -> Result<NewBlock, AppError> {
        Ok(NewBlock {
            court_id: self.court_id,
            slot: TimeSlot::new(self.starts_at, self.ends_at)?,
            reason: self.reason.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetBlocksParam {
    pub court_id: Option<i32>,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone)]
pub struct PaginatedBlocks {
    pub blocks: Vec<Block>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl PaginatedBlocks {
    pub fn into_dto(self) -> PaginatedBlocksDto {
        let total_pages = if self.per_page > 0 {
            self.total.div_ceil(self.per_page)
        } else {
            0
        };

        PaginatedBlocksDto {
            blocks: self.blocks.into_iter().map(|b| b.into_dto()).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages,
        }
    }
}
