pub mod auth;
pub mod refresh_cookie;
