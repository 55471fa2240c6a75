use serde::Serialize;

use super::Aggregator;
use crate::calc;
use crate::client::Fault;
use crate::models::{Guest, Reservation, Room, RoomStatus};

/// A reservation with its derived stay length and price
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub nights: i64,
    /// Absent when the room, and so its rate, could not be resolved
    pub total_price: Option<f64>,
}

impl From<Reservation> for ReservationView {
    fn from(reservation: Reservation) -> Self {
        Self {
            nights: calc::reservation_nights(&reservation),
            total_price: calc::reservation_total(&reservation),
            reservation,
        }
    }
}

/// A room with its review summary
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    #[serde(flatten)]
    pub room: Room,
    pub review_count: usize,
    pub average_rating: Option<f64>,
}

impl From<Room> for RoomView {
    fn from(room: Room) -> Self {
        Self {
            review_count: room.reviews.len(),
            average_rating: calc::average_rating(&room.reviews),
            room,
        }
    }
}

impl Aggregator {
    pub async fn list_reservations(&self) -> Result<Vec<ReservationView>, Fault> {
        let reservations = self.client.reservations().await?;
        tracing::info!(reservations = reservations.len(), "Loaded reservation listing");
        Ok(reservations.into_iter().map(ReservationView::from).collect())
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomView>, Fault> {
        let rooms = self.client.rooms().await?;
        tracing::info!(rooms = rooms.len(), "Loaded room listing");
        Ok(rooms.into_iter().map(RoomView::from).collect())
    }

    /// Rooms that can currently be booked
    ///
    /// Falls back to filtering the full room listing when `availableRooms`
    /// comes back null or empty.
    pub async fn available_rooms(&self) -> Result<Vec<Room>, Fault> {
        match self.client.available_rooms().await? {
            Some(rooms) if !rooms.is_empty() => Ok(rooms),
            _ => {
                tracing::debug!("availableRooms unresolved, filtering full room listing");
                let rooms = self.client.rooms().await?;
                Ok(rooms
                    .into_iter()
                    .filter(|room| room.status == RoomStatus::Available)
                    .collect())
            }
        }
    }

    pub async fn list_guests(&self) -> Result<Vec<Guest>, Fault> {
        let guests = self.client.guests().await?;
        tracing::info!(guests = guests.len(), "Loaded guest listing");
        Ok(guests)
    }
}
