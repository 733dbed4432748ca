use thiserror::Error;

/// Internal issues indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Password hashing failed.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned to client.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// Signing a JWT failed.
    #[error("Failed to sign token: {0}")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),

    /// Building a link from the configured application URL failed.
    #[error("Failed to build link from application URL: {0}")]
    InvalidLink(#[source] url::ParseError),

    /// A row that was just written could not be read back.
    #[error("{0} {1} missing after write")]
    MissingAfterWrite(&'static str, i32),

    /// A response header could not be built.
    #[error("Failed to build response header: {0}")]
    InvalidHeader(#[from] axum::http::header::InvalidHeaderValue),
}
