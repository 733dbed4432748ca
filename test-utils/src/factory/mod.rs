//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with a `Factory`
//! struct for customization and/or a `create_*` convenience function.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Owner with a venue and one court
//!     let owner = factory::helpers::create_owner_with_court(&db).await?;
//!
//!     // Customer account with its person and customer records
//!     let customer = factory::helpers::create_customer_account(&db).await?;
//!
//!     let reservation = factory::reservation::ReservationFactory::new(
//!         &db,
//!         owner.court.id,
//!         customer.customer.id,
//!     )
//!     .build()
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create login users with roles
//! - `person` - Create person records linked to users
//! - `venue` - Create venues owned by a person
//! - `court` - Create courts inside a venue
//! - `customer` - Create customer records linked to a person and user
//! - `reservation` - Create reservations on a court
//! - `block` - Create maintenance blocks on a court
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod block;
pub mod court;
pub mod customer;
pub mod helpers;
pub mod person;
pub mod reservation;
pub mod user;
pub mod venue;

pub use block::create_block;
pub use court::create_court;
pub use customer::create_customer;
pub use person::create_person;
pub use user::create_user;
pub use venue::create_venue;
