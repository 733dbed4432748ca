use std::time::Duration;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        cancellation::CancellationRepository, ownership::OwnershipRepository,
        reservation::ReservationRepository,
    },
    error::{internal::InternalError, AppError},
    model::{
        identity::Identity,
        reservation::{
            CancelReservationParam, Cancellation, CreateReservationParam, GetReservationsParam,
            PaginatedReservations, Reservation, ReservationStatus, UpdateReservationParam,
        },
        scope::{CreateSubject, ResourceKind, WriteAction},
    },
    service::{
        ledger::TimeSlotLedger,
        mail::{MailDispatcher, OutboundMail},
        scope::AccessScopeResolver,
    },
};

pub struct ReservationService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a MailDispatcher,
    deadline: Duration,
}

impl<'a> ReservationService<'a> {
    pub fn new(db: &'a DatabaseConnection, mailer: &'a MailDispatcher, deadline: Duration) -> Self {
        Self {
            db,
            mailer,
            deadline,
        }
    }

    fn ledger(&self) -> TimeSlotLedger<'a> {
        TimeSlotLedger::new(self.db, self.deadline)
    }

    /// Gets a page of reservations visible to the identity.
    pub async fn list(
        &self,
        identity: &Identity,
        param: GetReservationsParam,
    ) -> Result<PaginatedReservations, AppError> {
        let scope = AccessScopeResolver::new(self.db)
            .resolve_list(identity, ResourceKind::Reservation)
            .await?;

        Ok(ReservationRepository::new(self.db)
            .get_paginated(&scope, &param)
            .await?)
    }

    /// Gets a single reservation, cancelled ones included.
    pub async fn get(&self, identity: &Identity, id: i32) -> Result<Reservation, AppError> {
        AccessScopeResolver::new(self.db)
            .resolve_single(identity, ResourceKind::Reservation, id)
            .await?;

        ReservationRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Books a reservation on behalf of a customer.
    ///
    /// # Returns
    /// - `Ok(Reservation)` - Booked reservation
    /// - `Err(AppError::Validation)` - Bad interval or amounts
    /// - `Err(AppError::Forbidden)` - Identity cannot book for this customer
    /// - `Err(AppError::NotFound)` - Court or customer does not exist
    /// - `Err(AppError::Conflict)` - Interval is taken
    pub async fn create(
        &self,
        identity: &Identity,
        param: CreateReservationParam,
    ) -> Result<Reservation, AppError> {
        let reservation = param.validate()?;

        AccessScopeResolver::new(self.db)
            .authorize_write(
                identity,
                ResourceKind::Reservation,
                WriteAction::Create(CreateSubject {
                    court_id: reservation.court_id,
                    customer_id: Some(reservation.customer_id),
                }),
            )
            .await?;

        let booked = self.ledger().book_reservation(reservation).await?;

        tracing::info!(
            "User {} booked reservation {} on court {} ({})",
            identity.user_id,
            booked.id,
            booked.court_id,
            booked.status.as_str()
        );

        self.notify_customer(&booked, OutboundMail::reservation_booked)
            .await;

        Ok(booked)
    }

    /// Moves or reprices a reservation.
    pub async fn update(
        &self,
        identity: &Identity,
        param: UpdateReservationParam,
    ) -> Result<Reservation, AppError> {
        AccessScopeResolver::new(self.db)
            .authorize_write(identity, ResourceKind::Reservation, WriteAction::Update(param.id))
            .await?;

        self.ledger().reschedule_reservation(&param).await
    }

    /// Confirms a pending reservation. Only the venue side can approve, and only before the
    /// reservation ends.
    ///
    /// # Returns
    /// - `Ok(Reservation)` - Confirmed reservation
    /// - `Err(AppError::AlreadyCancelled)` - Reservation was cancelled
    /// - `Err(AppError::Validation)` - Reservation is not pending or has already ended
    pub async fn approve(&self, identity: &Identity, id: i32) -> Result<Reservation, AppError> {
        AccessScopeResolver::new(self.db)
            .authorize_write(identity, ResourceKind::Reservation, WriteAction::Approve(id))
            .await?;

        let txn = self.db.begin().await?;
        let repo = ReservationRepository::new(&txn);

        let Some(reservation) = repo.find_by_id(id).await? else {
            return Err(AppError::NotFound(format!("Reservation {} not found", id)));
        };
        if reservation.is_cancelled() {
            return Err(AppError::AlreadyCancelled(id));
        }
        if reservation.ends_at <= Utc::now() {
            return Err(AppError::Validation(format!(
                "Reservation {} ended before it was approved",
                id
            )));
        }
        if reservation.status != ReservationStatus::Pending || !repo.approve(id).await? {
            return Err(AppError::Validation(format!(
                "Reservation {} is not awaiting approval",
                id
            )));
        }

        let approved = repo
            .find_by_id(id)
            .await?
            .ok_or(InternalError::MissingAfterWrite("Reservation", id))?;

        txn.commit().await?;

        tracing::info!("User {} approved reservation {}", identity.user_id, id);

        self.notify_customer(&approved, OutboundMail::reservation_approved)
            .await;

        Ok(approved)
    }

    /// Cancels a reservation, freeing its interval.
    pub async fn cancel(
        &self,
        identity: &Identity,
        param: CancelReservationParam,
    ) -> Result<Cancellation, AppError> {
        let id = param.reservation_id;

        AccessScopeResolver::new(self.db)
            .authorize_write(identity, ResourceKind::Reservation, WriteAction::Delete(id))
            .await?;

        let cancelled = self.ledger().cancel_reservation(param).await?;

        tracing::info!("User {} cancelled reservation {}", identity.user_id, id);

        self.notify_customer(&cancelled.reservation, OutboundMail::reservation_cancelled)
            .await;

        Ok(cancelled.cancellation)
    }

    /// Gets every cancellation visible to the identity.
    pub async fn list_cancellations(&self, identity: &Identity) -> Result<Vec<Cancellation>, AppError> {
        let scope = AccessScopeResolver::new(self.db)
            .resolve_list(identity, ResourceKind::Cancellation)
            .await?;

        Ok(CancellationRepository::new(self.db).get_all(&scope).await?)
    }

    /// Mails the reservation's customer. Runs after commit and never fails the request.
    async fn notify_customer(
        &self,
        reservation: &Reservation,
        compose: fn(String, &Reservation) -> OutboundMail,
    ) {
        match OwnershipRepository::new(self.db)
            .customer_email(reservation.customer_id)
            .await
        {
            Ok(Some(email)) => self.mailer.dispatch(compose(email, reservation)),
            Ok(None) => {}
            Err(e) => tracing::warn!(
                "Failed to look up customer {} for reservation {} mail: {}",
                reservation.customer_id,
                reservation.id,
                e
            ),
        }
    }
}
