//! Dashboard statistics documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatistics {
    pub total_rooms: u32,
    pub available_rooms: u32,
    pub reserved_rooms: u32,
    pub occupied_rooms: u32,
    pub maintenance_rooms: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GuestStatistics {
    pub total_guests: u32,
    pub new_guests_this_month: u32,
    pub returning_guests: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStatistics {
    pub total_reservations: u32,
    pub active_reservations: u32,
    pub upcoming_reservations: u32,
    pub completed_reservations: u32,
    pub cancelled_reservations: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillingStatistics {
    pub total_bills: u32,
    pub pending_payments: u32,
    pub paid_bills: u32,
    pub total_revenue: f64,
}

/// One line of the front-desk activity feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: i64,
    pub guest_name: String,
    pub room_number: String,
    pub action: String,
    #[serde(deserialize_with = "super::dates::deserialize")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: f64,
}
