use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000005_create_court_table::Court, m20260301_000006_create_customer_table::Customer,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(pk_auto(Reservation::Id))
                    .col(integer(Reservation::CourtId))
                    .col(integer(Reservation::CustomerId))
                    .col(timestamp_with_time_zone(Reservation::StartsAt))
                    .col(timestamp_with_time_zone(Reservation::EndsAt))
                    .col(big_integer(Reservation::AmountBase).default(0))
                    .col(big_integer(Reservation::AmountExtra).default(0))
                    .col(big_integer(Reservation::AmountTotal).default(0))
                    .col(boolean(Reservation::RequiresApproval).default(false))
                    .col(string_len(Reservation::Status, 16))
                    .col(
                        timestamp_with_time_zone(Reservation::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Reservation::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Reservation::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_court_id")
                            .from(Reservation::Table, Reservation::CourtId)
                            .to(Court::Table, Court::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_customer_id")
                            .from(Reservation::Table, Reservation::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_court_id_starts_at")
                    .table(Reservation::Table)
                    .col(Reservation::CourtId)
                    .col(Reservation::StartsAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reservation {
    Table,
    Id,
    CourtId,
    CustomerId,
    StartsAt,
    EndsAt,
    AmountBase,
    AmountExtra,
    AmountTotal,
    RequiresApproval,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
