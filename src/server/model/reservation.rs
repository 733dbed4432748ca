//! Reservation domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::reservation::{
        CancelReservationDto, CancellationDto, CreateReservationDto, PaginatedReservationsDto,
        ReservationDto, UpdateReservationDto,
    },
    server::{error::AppError, model::slot::TimeSlot},
};

/// Lifecycle of a reservation.
///
/// `PENDING` and `CONFIRMED` occupy their interval. `COMPLETED` reservations have elapsed
/// and `CANCELLED` ones are soft-deleted; neither can be modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Initial status for a new reservation.
    pub fn initial(requires_approval: bool) -> Self {
        if requires_approval {
            Self::Pending
        } else {
            Self::Confirmed
        }
    }

    pub fn from_entity(status: entity::sea_orm_active_enums::ReservationStatus) -> Self {
        use entity::sea_orm_active_enums::ReservationStatus as EntityStatus;

        match status {
            EntityStatus::Pending => Self::Pending,
            EntityStatus::Confirmed => Self::Confirmed,
            EntityStatus::Completed => Self::Completed,
            EntityStatus::Cancelled => Self::Cancelled,
        }
    }

    pub fn into_entity(self) -> entity::sea_orm_active_enums::ReservationStatus {
        use entity::sea_orm_active_enums::ReservationStatus as EntityStatus;

        match self {
            Self::Pending => EntityStatus::Pending,
            Self::Confirmed => EntityStatus::Confirmed,
            Self::Completed => EntityStatus::Completed,
            Self::Cancelled => EntityStatus::Cancelled,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Price components in minor currency units.
///
/// The total is always derived, never supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amounts {
    base: i64,
    extra: i64,
}

impl Amounts {
    /// # Returns
    /// - `Ok(Amounts)` - Both components non-negative and the total fits in an `i64`
    /// - `Err(AppError::Validation)` - Negative component or overflowing total
    pub fn new(base: i64, extra: i64) -> Result<Self, AppError> {
        if base < 0 || extra < 0 {
            return Err(AppError::Validation(
                "Reservation amounts cannot be negative".to_string(),
            ));
        }
        if base.checked_add(extra).is_none() {
            return Err(AppError::Validation(
                "Reservation total amount is out of range".to_string(),
            ));
        }

        Ok(Self { base, extra })
    }

    pub fn base(&self) -> i64 {
        self.base
    }

    pub fn extra(&self) -> i64 {
        self.extra
    }

    pub fn total(&self) -> i64 {
        self.base + self.extra
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i32,
    pub court_id: i32,
    pub customer_id: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub amount_base: i64,
    pub amount_extra: i64,
    pub amount_total: i64,
    pub requires_approval: bool,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::reservation::Model) -> Self {
        Self {
            id: entity.id,
            court_id: entity.court_id,
            customer_id: entity.customer_id,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            amount_base: entity.amount_base,
            amount_extra: entity.amount_extra,
            amount_total: entity.amount_total,
            requires_approval: entity.requires_approval,
            status: ReservationStatus::from_entity(entity.status),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            deleted_at: entity.deleted_at,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.deleted_at.is_some() || self.status == ReservationStatus::Cancelled
    }

    pub fn into_dto(self) -> ReservationDto {
        ReservationDto {
            id: self.id,
            court_id: self.court_id,
            customer_id: self.customer_id,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            amount_base: self.amount_base,
            amount_extra: self.amount_extra,
            amount_total: self.amount_total,
            requires_approval: self.requires_approval,
            status: self.status.as_str().to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A validated reservation ready to be written by the ledger.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub court_id: i32,
    pub customer_id: i32,
    pub slot: TimeSlot,
    pub amounts: Amounts,
    pub requires_approval: bool,
}

#[derive(Debug, Clone)]
pub struct CreateReservationParam {
    pub court_id: i32,
    pub customer_id: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub amount_base: i64,
    pub amount_extra: i64,
    pub requires_approval: bool,
}

impl CreateReservationParam {
    pub fn from_dto(dto: CreateReservationDto) -> Self {
        Self {
            court_id: dto.court_id,
            customer_id: dto.customer_id,
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
            amount_base: dto.amount_base,
            amount_extra: dto.amount_extra,
            requires_approval: dto.requires_approval,
        }
    }

    /// Validates the interval and amounts.
    pub fn validate(&self) -> Result<NewReservation, AppError> {
        Ok(NewReservation {
            court_id: self.court_id,
            customer_id: self.customer_id,
            slot: TimeSlot::new(self.starts_at, self.ends_at)?,
            amounts: Amounts::new(self.amount_base, self.amount_extra)?,
            requires_approval: self.requires_approval,
        })
    }
}

/// Partial update of a reservation; omitted fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct UpdateReservationParam {
    pub id: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub amount_base: Option<i64>,
    pub amount_extra: Option<i64>,
}

impl UpdateReservationParam {
    pub fn from_dto(id: i32, dto: UpdateReservationDto) -> Self {
        Self {
            id,
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
            amount_base: dto.amount_base,
            amount_extra: dto.amount_extra,
        }
    }

    pub fn changes_interval(&self) -> bool {
        self.starts_at.is_some() || self.ends_at.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CancelReservationParam {
    pub reservation_id: i32,
    pub reason: Option<String>,
    pub channel: Option<String>,
}

impl CancelReservationParam {
    pub fn from_dto(reservation_id: i32, dto: CancelReservationDto) -> Self {
        Self {
            reservation_id,
            reason: dto.reason,
            channel: dto.channel,
        }
    }
}

/// Outcome of a cancellation: the reservation as committed, and the record of it.
#[derive(Debug, Clone, PartialEq)]
pub struct CancelledReservation {
    pub reservation: Reservation,
    pub cancellation: Cancellation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cancellation {
    pub id: i32,
    pub reservation_id: i32,
    pub customer_id: i32,
    pub reason: Option<String>,
    pub channel: Option<String>,
    pub cancelled_at: DateTime<Utc>,
}

impl Cancellation {
    pub fn from_entity(entity: entity::cancellation::Model) -> Self {
        Self {
            id: entity.id,
            reservation_id: entity.reservation_id,
            customer_id: entity.customer_id,
            reason: entity.reason,
            channel: entity.channel,
            cancelled_at: entity.cancelled_at,
        }
    }

    pub fn into_dto(self) -> CancellationDto {
        CancellationDto {
            id: self.id,
            reservation_id: self.reservation_id,
            customer_id: self.customer_id,
            reason: self.reason,
            channel: self.channel,
            cancelled_at: self.cancelled_at,
        }
    }
}

/// Filters for listing reservations within the caller's scope.
#[derive(Debug, Clone, Default)]
pub struct GetReservationsParam {
    pub court_id: Option<i32>,
    pub include_cancelled: bool,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone)]
pub struct PaginatedReservations {
    pub reservations: Vec<Reservation>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl PaginatedReservations {
    pub fn into_dto(self) -> PaginatedReservationsDto {
        let total_pages = if self.per_page > 0 {
            self.total.div_ceil(self.per_page)
        } else {
            0
        };

        PaginatedReservationsDto {
            reservations: self.reservations.into_iter().map(|r| r.into_dto()).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages,
        }
    }
}
