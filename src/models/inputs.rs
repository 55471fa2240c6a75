//! Mutation payloads
//!
//! These are always sent as bound GraphQL variables. The `*Update`
//! shapes omit unset fields so the service leaves them untouched.

use chrono::NaiveDate;
use serde::Serialize;

use super::{PaymentStatus, ReservationStatus, RoomStatus};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomInput {
    pub room_number: String,
    pub room_type: String,
    pub price_per_night: f64,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuestInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationInput {
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillInput {
    pub reservation_id: i64,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl BillUpdate {
    pub fn payment_status(status: PaymentStatus) -> Self {
        Self {
            payment_status: Some(status),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_omits_unset_fields() {
        let update = BillUpdate::payment_status(PaymentStatus::Paid);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"paymentStatus": "paid"})
        );
    }

    #[test]
    fn test_reservation_input_dates() {
        let input = ReservationInput {
            guest_id: 1,
            room_id: 2,
            check_in_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            status: ReservationStatus::CheckedIn,
        };

        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "guestId": 1,
                "roomId": 2,
                "checkInDate": "2024-01-01",
                "checkOutDate": "2024-01-03",
                "status": "checked-in"
            })
        );
    }
}
