use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CourtDto {
    pub id: i32,
    pub venue_id: i32,
    pub name: String,
}
