use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateReservationDto {
    pub court_id: i32,
    pub customer_id: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Amounts are in minor currency units.
    pub amount_base: i64,
    #[serde(default)]
    pub amount_extra: i64,
    #[serde(default)]
    pub requires_approval: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct UpdateReservationDto {
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub amount_base: Option<i64>,
    pub amount_extra: Option<i64>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
pub struct CancelReservationDto {
    pub reason: Option<String>,
    pub channel: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub court_id: i32,
    pub customer_id: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub amount_base: i64,
    pub amount_extra: i64,
    pub amount_total: i64,
    pub requires_approval: bool,
    /// `PENDING`, `CONFIRMED`, `COMPLETED` or `CANCELLED`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CancellationDto {
    pub id: i32,
    pub reservation_id: i32,
    pub customer_id: i32,
    pub reason: Option<String>,
    pub channel: Option<String>,
    pub cancelled_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedReservationsDto {
    pub reservations: Vec<ReservationDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
