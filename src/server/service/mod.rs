//! Business logic layer.
//!
//! Services coordinate repositories, enforce access scoping and run the booking
//! transactions. Controllers call services; services never see HTTP types.

pub mod auth;
pub mod block;
pub mod court;
pub mod jwt;
pub mod ledger;
pub mod mail;
pub mod password;
pub mod reservation;
pub mod scope;
pub mod token_vault;
