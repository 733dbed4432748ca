//! Server-side domain models.
//!
//! Models in this module sit between the database entities and the API DTOs. Repositories
//! return them, services operate on them, and controllers convert them into DTOs.

pub mod auth_token;
pub mod block;
pub mod court;
pub mod identity;
pub mod reservation;
pub mod scope;
pub mod slot;
pub mod user;
