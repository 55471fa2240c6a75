//! Domain records returned by the hotel services
//!
//! These mirror the documents the room, reservation, guest and billing
//! services emit (camelCase on the wire). They are plain data: derived
//! fields such as nights and totals live in [`crate::calc`], composites
//! live in [`crate::aggregate`].

mod bill;
pub mod dates;
mod guest;
mod inputs;
mod reservation;
mod review;
mod room;
mod stats;

pub use bill::{Bill, PaymentStatus};
pub use guest::{Guest, GuestSnapshot, LoyaltyInfo, Reward};
pub use inputs::{
    BillInput, BillUpdate, GuestInput, GuestUpdate, ReservationInput, ReservationUpdate,
    RoomInput, RoomUpdate,
};
pub use reservation::{Reservation, ReservationStatus};
pub use review::{Review, ReviewAspect, ReviewedRoom};
pub use room::{Room, RoomSnapshot, RoomStatus};
pub use stats::{
    ActivityEntry, BillingStatistics, GuestStatistics, MonthlyRevenue, ReservationStatistics,
    RoomStatistics,
};

use thiserror::Error;

/// Returned when a status label does not name a known status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} status: {value}")]
pub struct ParseStatusError {
    pub kind: &'static str,
    pub value: String,
}
