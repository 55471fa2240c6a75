//! Room service operations

use serde_json::json;

use super::{Fault, Operation, ServiceClient, ServiceKey};
use crate::models::{Room, RoomInput, RoomStatistics, RoomUpdate};

const ROOMS: &str = r#"
query Rooms {
  rooms {
    id roomNumber roomType pricePerNight status
    reviews {
      reviewId stayId overallRating content reviewDate
      aspects { aspectId rating comment }
    }
  }
}"#;

const AVAILABLE_ROOMS: &str = r#"
query AvailableRooms {
  availableRooms { id roomNumber roomType pricePerNight status }
}"#;

const ROOM_STATISTICS: &str = r#"
query RoomStatistics {
  roomStatistics { totalRooms availableRooms reservedRooms occupiedRooms maintenanceRooms }
}"#;

const CREATE_ROOM: &str = r#"
mutation CreateRoom($roomData: RoomInput!) {
  createRoom(roomData: $roomData) { id roomNumber roomType pricePerNight status }
}"#;

const UPDATE_ROOM: &str = r#"
mutation UpdateRoom($id: Int!, $roomData: RoomUpdateInput!) {
  updateRoom(id: $id, roomData: $roomData) { id roomNumber roomType pricePerNight status }
}"#;

const DELETE_ROOM: &str = r#"
mutation DeleteRoom($id: Int!) {
  deleteRoom(id: $id)
}"#;

impl ServiceClient {
    /// All rooms, with their reviews
    pub async fn rooms(&self) -> Result<Vec<Room>, Fault> {
        let op = Operation::new("Rooms", "rooms", ROOMS);
        self.request(ServiceKey::Room, &op).await
    }

    /// `None` when the service does not resolve `availableRooms`
    pub async fn available_rooms(&self) -> Result<Option<Vec<Room>>, Fault> {
        let op = Operation::new("AvailableRooms", "availableRooms", AVAILABLE_ROOMS);
        self.request(ServiceKey::Room, &op).await
    }

    pub async fn room_statistics(&self) -> Result<RoomStatistics, Fault> {
        let op = Operation::new("RoomStatistics", "roomStatistics", ROOM_STATISTICS);
        self.request(ServiceKey::Room, &op).await
    }

    pub async fn create_room(&self, input: &RoomInput) -> Result<Room, Fault> {
        let op = Operation::new("CreateRoom", "createRoom", CREATE_ROOM).var("roomData", json!(input));
        self.request(ServiceKey::Room, &op).await
    }

    /// `None` when no room has this id
    pub async fn update_room(&self, id: i64, update: &RoomUpdate) -> Result<Option<Room>, Fault> {
        let op = Operation::new("UpdateRoom", "updateRoom", UPDATE_ROOM)
            .var("id", id)
            .var("roomData", json!(update));
        self.request(ServiceKey::Room, &op).await
    }

    /// `false` when no room has this id
    pub async fn delete_room(&self, id: i64) -> Result<bool, Fault> {
        let op = Operation::new("DeleteRoom", "deleteRoom", DELETE_ROOM).var("id", id);
        self.request(ServiceKey::Room, &op).await
    }
}
