//! Data access layer.
//!
//! Repositories wrap SeaORM queries and convert entity models into domain models at their
//! boundary. Repositories used inside a booking transaction are generic over
//! `ConnectionTrait` so the same code runs against a pool or an open transaction.

pub mod auth_token;
pub mod block;
pub mod cancellation;
pub mod court;
pub mod interval;
pub mod ownership;
pub mod reservation;
pub mod scope;
pub mod soft_delete;
pub mod user;
