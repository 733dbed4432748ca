//! API data transfer objects.
//!
//! Request and response bodies exchanged over the HTTP API. Server-side domain models
//! convert into these at the controller boundary.

pub mod api;
pub mod auth;
pub mod block;
pub mod court;
pub mod reservation;
