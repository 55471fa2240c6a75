use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{GuestSnapshot, ParseStatusError, RoomSnapshot};

/// A reservation, with the guest and room the reservation service
/// resolved for it (each independently absent when that lookup failed)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub guest_id: i64,
    pub room_id: i64,
    #[serde(deserialize_with = "super::dates::deserialize")]
    pub check_in_date: DateTime<Utc>,
    #[serde(deserialize_with = "super::dates::deserialize")]
    pub check_out_date: DateTime<Utc>,
    pub status: ReservationStatus,
    #[serde(default)]
    pub guest: Option<GuestSnapshot>,
    #[serde(default)]
    pub room: Option<RoomSnapshot>,
}

impl Reservation {
    pub fn guest_name(&self) -> Option<&str> {
        self.guest.as_ref().map(|g| g.full_name.as_str())
    }

    pub fn room_number(&self) -> Option<&str> {
        self.room.as_ref().map(|r| r.room_number.as_str())
    }
}

/// Lifecycle state of a reservation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    pub fn all() -> &'static [ReservationStatus] {
        &[
            ReservationStatus::Confirmed,
            ReservationStatus::CheckedIn,
            ReservationStatus::CheckedOut,
            ReservationStatus::Cancelled,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedIn => "checked-in",
            ReservationStatus::CheckedOut => "checked-out",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Unknown => "unknown",
        }
    }

    /// Whether a bill may be raised against a reservation in this state
    pub fn is_billable(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ReservationStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ParseStatusError {
                kind: "reservation",
                value: s.to_string(),
            })
    }
}
