use super::*;
use crate::server::{
    model::{
        block::NewBlock,
        reservation::{
            Amounts, CancelReservationParam, NewReservation, ReservationStatus,
            UpdateReservationParam,
        },
        slot::{SlotKind, TimeSlot},
    },
    service::ledger::TimeSlotLedger,
};

mod cancel_reservation;
mod place_block;
mod reschedule_reservation;

fn new_reservation(court_id: i32, customer_id: i32, start: u32, end: u32) -> NewReservation {
    NewReservation {
        court_id,
        customer_id,
        slot: TimeSlot::new(at(start), at(end)).unwrap(),
        amounts: Amounts::new(2000, 500).unwrap(),
        requires_approval: false,
    }
}

fn new_block(court_id: i32, start: u32, end: u32) -> NewBlock {
    NewBlock {
        court_id,
        slot: TimeSlot::new(at(start), at(end)).unwrap(),
        reason: Some("Resurfacing".to_string()),
    }
}
