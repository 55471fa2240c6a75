//! Reservation service operations

use serde_json::json;

use super::{Fault, Operation, ServiceClient, ServiceKey};
use crate::models::{
    ActivityEntry, Reservation, ReservationInput, ReservationStatistics, ReservationUpdate,
};

const RESERVATIONS: &str = r#"
query Reservations {
  reservations {
    id guestId roomId checkInDate checkOutDate status
    guest { id fullName email }
    room { id roomNumber roomType pricePerNight }
  }
}"#;

const RESERVATION: &str = r#"
query Reservation($id: Int!) {
  reservation(id: $id) {
    id guestId roomId checkInDate checkOutDate status
    guest { id fullName email }
    room { id roomNumber roomType pricePerNight }
  }
}"#;

const RESERVATION_STATISTICS: &str = r#"
query ReservationStatistics {
  reservationStatistics {
    totalReservations activeReservations upcomingReservations
    completedReservations cancelledReservations
  }
}"#;

const RECENT_ACTIVITY: &str = r#"
query RecentActivity {
  recentActivity { id guestName roomNumber action timestamp }
}"#;

const CREATE_RESERVATION: &str = r#"
mutation CreateReservation($reservationData: ReservationInput!) {
  createReservation(reservationData: $reservationData) {
    id guestId roomId checkInDate checkOutDate status
  }
}"#;

const UPDATE_RESERVATION: &str = r#"
mutation UpdateReservation($id: Int!, $reservationData: ReservationUpdateInput!) {
  updateReservation(id: $id, reservationData: $reservationData) {
    id guestId roomId checkInDate checkOutDate status
  }
}"#;

const DELETE_RESERVATION: &str = r#"
mutation DeleteReservation($id: Int!) {
  deleteReservation(id: $id)
}"#;

impl ServiceClient {
    /// All reservations, with guest and room resolved where possible
    pub async fn reservations(&self) -> Result<Vec<Reservation>, Fault> {
        let op = Operation::new("Reservations", "reservations", RESERVATIONS);
        self.request(ServiceKey::Reservation, &op).await
    }

    pub async fn reservation(&self, id: i64) -> Result<Option<Reservation>, Fault> {
        let op = Operation::new("Reservation", "reservation", RESERVATION).var("id", id);
        self.request(ServiceKey::Reservation, &op).await
    }

    pub async fn reservation_statistics(&self) -> Result<ReservationStatistics, Fault> {
        let op = Operation::new(
            "ReservationStatistics",
            "reservationStatistics",
            RESERVATION_STATISTICS,
        );
        self.request(ServiceKey::Reservation, &op).await
    }

    pub async fn recent_activity(&self) -> Result<Vec<ActivityEntry>, Fault> {
        let op = Operation::new("RecentActivity", "recentActivity", RECENT_ACTIVITY);
        self.request(ServiceKey::Reservation, &op).await
    }

    pub async fn create_reservation(&self, input: &ReservationInput) -> Result<Reservation, Fault> {
        let op = Operation::new("CreateReservation", "createReservation", CREATE_RESERVATION)
            .var("reservationData", json!(input));
        self.request(ServiceKey::Reservation, &op).await
    }

    pub async fn update_reservation(
        &self,
        id: i64,
        update: &ReservationUpdate,
    ) -> Result<Option<Reservation>, Fault> {
        let op = Operation::new("UpdateReservation", "updateReservation", UPDATE_RESERVATION)
            .var("id", id)
            .var("reservationData", json!(update));
        self.request(ServiceKey::Reservation, &op).await
    }

    pub async fn delete_reservation(&self, id: i64) -> Result<bool, Fault> {
        let op = Operation::new("DeleteReservation", "deleteReservation", DELETE_RESERVATION)
            .var("id", id);
        self.request(ServiceKey::Reservation, &op).await
    }
}
