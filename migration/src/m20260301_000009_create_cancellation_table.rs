use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000006_create_customer_table::Customer,
    m20260301_000007_create_reservation_table::Reservation,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cancellation::Table)
                    .if_not_exists()
                    .col(pk_auto(Cancellation::Id))
                    .col(integer_uniq(Cancellation::ReservationId))
                    .col(integer(Cancellation::CustomerId))
                    .col(text_null(Cancellation::Reason))
                    .col(string_null(Cancellation::Channel))
                    .col(
                        timestamp_with_time_zone(Cancellation::CancelledAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cancellation_reservation_id")
                            .from(Cancellation::Table, Cancellation::ReservationId)
                            .to(Reservation::Table, Reservation::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cancellation_customer_id")
                            .from(Cancellation::Table, Cancellation::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cancellation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Cancellation {
    Table,
    Id,
    ReservationId,
    CustomerId,
    Reason,
    Channel,
    CancelledAt,
}
