//! The time slot ledger.
//!
//! Every write that occupies time on a court goes through [`TimeSlotLedger`]. Each write is
//! one transaction that first takes the court-scoped lock, then checks the proposed
//! interval against active reservations and blocks, then writes. Two proposals for the same
//! court therefore never both pass the check, while proposals for different courts proceed
//! independently.

use std::{future::Future, time::Duration};

use chrono::Utc;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::server::{
    data::{
        block::BlockRepository, cancellation::CancellationRepository, court::CourtRepository,
        interval::CourtInterval, reservation::ReservationRepository,
    },
    error::{internal::InternalError, AppError},
    model::{
        block::{Block, NewBlock},
        reservation::{
            Amounts, CancelReservationParam, CancelledReservation, NewReservation, Reservation,
            ReservationStatus, UpdateReservationParam,
        },
        slot::{SlotKind, TimeSlot},
    },
};

pub struct TimeSlotLedger<'a> {
    db: &'a DatabaseConnection,
    deadline: Duration,
}

impl<'a> TimeSlotLedger<'a> {
    /// Creates a ledger whose transactional units roll back after `deadline`.
    pub fn new(db: &'a DatabaseConnection, deadline: Duration) -> Self {
        Self { db, deadline }
    }

    /// Locks the court and checks that `slot` is free on it.
    ///
    /// Must run inside the transaction that performs the write; the lock is released when
    /// that transaction commits or rolls back.
    ///
    /// # Arguments
    /// - `txn` - Open transaction the write will use
    /// - `court_id` - Court being written to
    /// - `slot` - Proposed interval
    /// - `kind` - Whether a reservation or a block is being proposed
    /// - `exclude_id` - Row of the same kind to ignore, used when moving an existing row
    ///
    /// # Returns
    /// - `Ok(())` - Interval is free and the lock is held
    /// - `Err(AppError::NotFound)` - Court does not exist
    /// - `Err(AppError::Conflict)` - Interval overlaps an active reservation or block
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn propose_interval(
        txn: &DatabaseTransaction,
        court_id: i32,
        slot: &TimeSlot,
        kind: SlotKind,
        exclude_id: Option<i32>,
    ) -> Result<(), AppError> {
        if !CourtRepository::new(txn).lock_for_booking(court_id).await? {
            return Err(AppError::NotFound(format!("Court {} not found", court_id)));
        }

        let exclude_reservation = exclude_id.filter(|_| kind == SlotKind::Reservation);
        let exclude_block = exclude_id.filter(|_| kind == SlotKind::Block);

        Self::ensure_free::<entity::reservation::Entity>(txn, court_id, slot, exclude_reservation)
            .await?;
        Self::ensure_free::<entity::block::Entity>(txn, court_id, slot, exclude_block).await?;

        Ok(())
    }

    async fn ensure_free<E: CourtInterval>(
        txn: &DatabaseTransaction,
        court_id: i32,
        slot: &TimeSlot,
        exclude_id: Option<i32>,
    ) -> Result<(), AppError> {
        if let Some(existing) = E::active_overlapping(court_id, slot, exclude_id)
            .one(txn)
            .await?
        {
            let conflicting_id = E::model_id(&existing);
            tracing::debug!(
                "Rejected interval {} - {} on court {}: overlaps {} {}",
                slot.starts_at(),
                slot.ends_at(),
                court_id,
                E::KIND,
                conflicting_id
            );

            return Err(AppError::Conflict {
                kind: E::KIND,
                conflicting_id,
            });
        }

        Ok(())
    }

    /// Books a new reservation.
    ///
    /// # Returns
    /// - `Ok(Reservation)` - Stored reservation, `PENDING` or `CONFIRMED`
    /// - `Err(AppError::Conflict)` - Interval is taken
    /// - `Err(AppError::NotFound)` - Court does not exist
    /// - `Err(AppError::Timeout)` - Transaction exceeded its deadline and was rolled back
    pub async fn book_reservation(&self, reservation: NewReservation) -> Result<Reservation, AppError> {
        self.within_deadline("Reservation booking", async {
            let txn = self.db.begin().await?;

            Self::propose_interval(
                &txn,
                reservation.court_id,
                &reservation.slot,
                SlotKind::Reservation,
                None,
            )
            .await?;

            let created = ReservationRepository::new(&txn).create(reservation).await?;

            txn.commit().await?;

            Ok(created)
        })
        .await
    }

    /// Moves and/or reprices an existing reservation.
    ///
    /// The interval is only re-checked when it changes, ignoring the reservation itself.
    pub async fn reschedule_reservation(
        &self,
        param: &UpdateReservationParam,
    ) -> Result<Reservation, AppError> {
        let current = self.load_modifiable_reservation(param.id).await?;

        let slot = TimeSlot::new(
            param.starts_at.unwrap_or(current.starts_at),
            param.ends_at.unwrap_or(current.ends_at),
        )?;
        let amounts = Amounts::new(
            param.amount_base.unwrap_or(current.amount_base),
            param.amount_extra.unwrap_or(current.amount_extra),
        )?;

        self.within_deadline("Reservation update", async {
            let txn = self.db.begin().await?;

            if param.changes_interval() {
                Self::propose_interval(
                    &txn,
                    current.court_id,
                    &slot,
                    SlotKind::Reservation,
                    Some(current.id),
                )
                .await?;
            }

            let repo = ReservationRepository::new(&txn);
            if !repo.reschedule(current.id, &slot, &amounts).await? {
                return Err(AppError::AlreadyCancelled(current.id));
            }

            let updated = repo
                .find_by_id(current.id)
                .await?
                .ok_or(InternalError::MissingAfterWrite("Reservation", current.id))?;

            txn.commit().await?;

            Ok(updated)
        })
        .await
    }

    /// Cancels a reservation and records the cancellation, freeing its interval.
    ///
    /// # Returns
    /// - `Ok(CancelledReservation)` - Cancelled reservation and its cancellation record
    /// - `Err(AppError::NotFound)` - Reservation does not exist
    /// - `Err(AppError::AlreadyCancelled)` - Reservation was cancelled before
    /// - `Err(AppError::Validation)` - Reservation already completed
    pub async fn cancel_reservation(
        &self,
        param: CancelReservationParam,
    ) -> Result<CancelledReservation, AppError> {
        let current = self.load_modifiable_reservation(param.reservation_id).await?;

        self.within_deadline("Reservation cancellation", async {
            let txn = self.db.begin().await?;
            let now = Utc::now();

            let repo = ReservationRepository::new(&txn);
            if !repo.cancel(current.id, now).await? {
                return Err(AppError::AlreadyCancelled(current.id));
            }

            let cancellation = CancellationRepository::new(&txn)
                .create(current.customer_id, param, now)
                .await?;
            let reservation = repo
                .find_by_id(current.id)
                .await?
                .ok_or(InternalError::MissingAfterWrite("Reservation", current.id))?;

            txn.commit().await?;

            Ok(CancelledReservation {
                reservation,
                cancellation,
            })
        })
        .await
    }

    /// Places a maintenance block on a court.
    pub async fn place_block(&self, block: NewBlock) -> Result<Block, AppError> {
        self.within_deadline("Block placement", async {
            let txn = self.db.begin().await?;

            Self::propose_interval(&txn, block.court_id, &block.slot, SlotKind::Block, None)
                .await?;

            let created = BlockRepository::new(&txn).create(block).await?;

            txn.commit().await?;

            Ok(created)
        })
        .await
    }

    /// Removes a block, freeing its interval.
    pub async fn remove_block(&self, block_id: i32) -> Result<(), AppError> {
        self.within_deadline("Block removal", async {
            let removed = BlockRepository::new(self.db)
                .remove(block_id, Utc::now())
                .await?;

            if !removed {
                return Err(AppError::NotFound(format!("Block {} not found", block_id)));
            }

            Ok(())
        })
        .await
    }

    async fn load_modifiable_reservation(&self, id: i32) -> Result<Reservation, AppError> {
        let Some(reservation) = ReservationRepository::new(self.db).find_by_id(id).await? else {
            return Err(AppError::NotFound(format!("Reservation {} not found", id)));
        };

        if reservation.is_cancelled() {
            return Err(AppError::AlreadyCancelled(id));
        }
        if reservation.status == ReservationStatus::Completed {
            return Err(AppError::Validation(format!(
                "Reservation {} has already been completed",
                id
            )));
        }

        Ok(reservation)
    }

    async fn within_deadline<T>(
        &self,
        operation: &str,
        unit: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        match tokio::time::timeout(self.deadline, unit).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(operation.to_string())),
        }
    }
}
