pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_user_role_table;
mod m20260301_000003_create_person_table;
mod m20260301_000004_create_venue_table;
mod m20260301_000005_create_court_table;
mod m20260301_000006_create_customer_table;
mod m20260301_000007_create_reservation_table;
mod m20260301_000008_create_block_table;
mod m20260301_000009_create_cancellation_table;
mod m20260301_000010_create_auth_token_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_user_role_table::Migration),
            Box::new(m20260301_000003_create_person_table::Migration),
            Box::new(m20260301_000004_create_venue_table::Migration),
            Box::new(m20260301_000005_create_court_table::Migration),
            Box::new(m20260301_000006_create_customer_table::Migration),
            Box::new(m20260301_000007_create_reservation_table::Migration),
            Box::new(m20260301_000008_create_block_table::Migration),
            Box::new(m20260301_000009_create_cancellation_table::Migration),
            Box::new(m20260301_000010_create_auth_token_table::Migration),
        ]
    }
}
