use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000005_create_court_table::Court;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Block::Table)
                    .if_not_exists()
                    .col(pk_auto(Block::Id))
                    .col(integer(Block::CourtId))
                    .col(timestamp_with_time_zone(Block::StartsAt))
                    .col(timestamp_with_time_zone(Block::EndsAt))
                    .col(text_null(Block::Reason))
                    .col(
                        timestamp_with_time_zone(Block::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Block::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Block::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_block_court_id")
                            .from(Block::Table, Block::CourtId)
                            .to(Court::Table, Court::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_block_court_id_starts_at")
                    .table(Block::Table)
                    .col(Block::CourtId)
                    .col(Block::StartsAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Block::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Block {
    Table,
    Id,
    CourtId,
    StartsAt,
    EndsAt,
    Reason,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
