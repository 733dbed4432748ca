pub mod auth;
pub mod block;
pub mod court;
pub mod reservation;
