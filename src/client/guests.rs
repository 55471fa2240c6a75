//! Guest service operations (guests, loyalty and reviews)

use serde_json::json;

use super::{Fault, Operation, ServiceClient, ServiceKey};
use crate::models::{Guest, GuestInput, GuestStatistics, GuestUpdate, Review};

const GUESTS: &str = r#"
query Guests {
  guests { id fullName email phone address }
}"#;

const GUEST: &str = r#"
query Guest($id: Int!) {
  guest(id: $id) { id fullName email phone address }
}"#;

const GUEST_WITH_LOYALTY: &str = r#"
query GuestWithLoyalty($id: Int!) {
  guest(id: $id) {
    id fullName email phone address
    loyaltyInfo {
      points tier memberSince
      rewards { id name description pointsRequired }
    }
  }
}"#;

const GUEST_STATISTICS: &str = r#"
query GuestStatistics {
  guestStatistics { totalGuests newGuestsThisMonth returningGuests }
}"#;

const REVIEWS_BY_GUEST: &str = r#"
query ReviewsByGuest($guestId: Int!) {
  reviewsByGuest(guestId: $guestId) {
    reviewId stayId overallRating content reviewDate
    room { roomNumber }
    aspects { aspectId rating comment }
  }
}"#;

const CREATE_GUEST: &str = r#"
mutation CreateGuest($guestData: GuestInput!) {
  createGuest(guestData: $guestData) { id fullName email phone address }
}"#;

const UPDATE_GUEST: &str = r#"
mutation UpdateGuest($id: Int!, $guestData: GuestUpdateInput!) {
  updateGuest(id: $id, guestData: $guestData) { id fullName email phone address }
}"#;

const DELETE_GUEST: &str = r#"
mutation DeleteGuest($id: Int!) {
  deleteGuest(id: $id)
}"#;

impl ServiceClient {
    pub async fn guests(&self) -> Result<Vec<Guest>, Fault> {
        let op = Operation::new("Guests", "guests", GUESTS);
        self.request(ServiceKey::Guest, &op).await
    }

    /// Guest record without loyalty resolution
    pub async fn guest(&self, id: i64) -> Result<Option<Guest>, Fault> {
        let op = Operation::new("Guest", "guest", GUEST).var("id", id);
        self.request(ServiceKey::Guest, &op).await
    }

    /// Guest record with loyalty info resolved in the same call
    ///
    /// When the loyalty subsystem is down the guest service either
    /// returns `loyaltyInfo: null` or fails the whole call with an
    /// application error.
    pub async fn guest_with_loyalty(&self, id: i64) -> Result<Option<Guest>, Fault> {
        let op = Operation::new("GuestWithLoyalty", "guest", GUEST_WITH_LOYALTY).var("id", id);
        self.request(ServiceKey::Guest, &op).await
    }

    pub async fn guest_statistics(&self) -> Result<GuestStatistics, Fault> {
        let op = Operation::new("GuestStatistics", "guestStatistics", GUEST_STATISTICS);
        self.request(ServiceKey::Guest, &op).await
    }

    pub async fn reviews_by_guest(&self, guest_id: i64) -> Result<Vec<Review>, Fault> {
        let op = Operation::new("ReviewsByGuest", "reviewsByGuest", REVIEWS_BY_GUEST)
            .var("guestId", guest_id);
        self.request(ServiceKey::Guest, &op).await
    }

    pub async fn create_guest(&self, input: &GuestInput) -> Result<Guest, Fault> {
        let op = Operation::new("CreateGuest", "createGuest", CREATE_GUEST)
            .var("guestData", json!(input));
        self.request(ServiceKey::Guest, &op).await
    }

    pub async fn update_guest(&self, id: i64, update: &GuestUpdate) -> Result<Option<Guest>, Fault> {
        let op = Operation::new("UpdateGuest", "updateGuest", UPDATE_GUEST)
            .var("id", id)
            .var("guestData", json!(update));
        self.request(ServiceKey::Guest, &op).await
    }

    pub async fn delete_guest(&self, id: i64) -> Result<bool, Fault> {
        let op = Operation::new("DeleteGuest", "deleteGuest", DELETE_GUEST).var("id", id);
        self.request(ServiceKey::Guest, &op).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::ScriptedTransport;
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_guest_name_with_quotes_is_bound() {
        let transport = ScriptedTransport::new(|_, op| {
            assert!(!op.document().contains("O'Hara"));
            let data = op.variable("guestData").cloned().unwrap();
            Ok(json!({"createGuest": {
                "id": 31,
                "fullName": data["fullName"],
                "email": data["email"],
                "phone": data["phone"],
                "address": data["address"]
            }}))
        });
        let client = ServiceClient::new(Arc::new(transport));

        let guest = client
            .create_guest(&GuestInput {
                full_name: "Scarlett \"Katie\" O'Hara".to_string(),
                email: "katie@example.com".to_string(),
                phone: "555-0199".to_string(),
                address: "Tara\nGeorgia".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(guest.full_name, "Scarlett \"Katie\" O'Hara");
        assert_eq!(guest.address, "Tara\nGeorgia");
    }

    #[tokio::test]
    async fn test_reviews_by_guest() {
        let transport = ScriptedTransport::new(|_, op| {
            assert_eq!(op.variable("guestId"), Some(&json!(3)));
            Ok(json!({"reviewsByGuest": [{
                "reviewId": 1,
                "overallRating": 5,
                "content": "Lovely stay",
                "reviewDate": "2024-02-01",
                "room": {"roomNumber": "203"}
            }]}))
        });
        let client = ServiceClient::new(Arc::new(transport));

        let reviews = client.reviews_by_guest(3).await.unwrap();
        assert_eq!(reviews[0].overall_rating, 5);
        assert_eq!(reviews[0].room.as_ref().unwrap().room_number, "203");
        assert!(reviews[0].aspects.is_empty());
    }
}
