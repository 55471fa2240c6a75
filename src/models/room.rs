use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{ParseStatusError, Review};

/// A room as listed by the room service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    /// Unique within the hotel
    pub room_number: String,
    pub room_type: String,
    pub price_per_night: f64,
    pub status: RoomStatus,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// The room fields the reservation service resolves onto a reservation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub id: i64,
    pub room_number: String,
    #[serde(default)]
    pub room_type: String,
    pub price_per_night: f64,
}

/// Occupancy state of a room
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Reserved,
    Occupied,
    Maintenance,
    /// Any state this client does not know; kept so one row cannot fail a listing
    #[serde(other)]
    Unknown,
}

impl RoomStatus {
    pub fn all() -> &'static [RoomStatus] {
        &[
            RoomStatus::Available,
            RoomStatus::Reserved,
            RoomStatus::Occupied,
            RoomStatus::Maintenance,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Reserved => "reserved",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Maintenance => "maintenance",
            RoomStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        RoomStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ParseStatusError {
                kind: "room",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_from_service_document() {
        let json = r#"{
            "id": 7,
            "roomNumber": "101",
            "roomType": "Deluxe",
            "pricePerNight": 150.0,
            "status": "maintenance",
            "reviews": [{
                "reviewId": 1,
                "stayId": 7,
                "overallRating": 4,
                "content": "Great room with a nice view",
                "reviewDate": "2025-06-01",
                "aspects": [{"aspectId": 1, "rating": 4, "comment": "Clean and comfortable"}]
            }]
        }"#;

        let room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(room.room_number, "101");
        assert_eq!(room.status, RoomStatus::Maintenance);
        assert_eq!(room.reviews.len(), 1);
        assert_eq!(room.reviews[0].aspects[0].rating, 4);
    }

    #[test]
    fn test_reviews_default_to_empty() {
        let json = r#"{"id": 1, "roomNumber": "2", "roomType": "Single", "pricePerNight": 80, "status": "available"}"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert!(room.reviews.is_empty());
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("Occupied".parse::<RoomStatus>().unwrap(), RoomStatus::Occupied);
        assert!("vacant".parse::<RoomStatus>().is_err());
    }

    #[test]
    fn test_unrecognised_status_decodes_as_unknown() {
        let json = r#"[
            {"id": 1, "roomNumber": "101", "roomType": "Single", "pricePerNight": 80, "status": "available"},
            {"id": 2, "roomNumber": "102", "roomType": "Single", "pricePerNight": 80, "status": "cleaning"}
        ]"#;

        let rooms: Vec<Room> = serde_json::from_str(json).unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[1].status, RoomStatus::Unknown);
        assert_eq!(rooms[1].status.to_string(), "unknown");
    }
}
