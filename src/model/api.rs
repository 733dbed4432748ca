use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Body returned with 409 when a proposed interval clashes with an existing one.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ConflictDto {
    pub error: String,
    /// `RESERVATION` or `BLOCK`
    pub kind: String,
    pub conflicting_id: i32,
}
