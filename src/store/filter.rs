//! Client-side list filtering
//!
//! A filter is a case-insensitive substring search over a fixed set of
//! fields per entity, AND an optional exact status match.

use std::borrow::Cow;
use std::convert::Infallible;

use crate::aggregate::{BillView, ReservationView, RoomView};
use crate::models::{Guest, PaymentStatus, ReservationStatus, RoomStatus};

/// An entity that can be matched by a [`ListFilter`]
pub trait Searchable {
    type Status: PartialEq;

    /// Fields the search text is matched against
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// `None` for entities without a status
    fn status(&self) -> Option<&Self::Status>;
}

/// Search text plus optional status
#[derive(Debug, Clone, PartialEq)]
pub struct ListFilter<S> {
    text: String,
    status: Option<S>,
}

impl<S> Default for ListFilter<S> {
    fn default() -> Self {
        Self {
            text: String::new(),
            status: None,
        }
    }
}

impl<S: PartialEq> ListFilter<S> {
    /// Filter matching everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: search text (matched case-insensitively, whitespace
    /// included)
    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.text = text.as_ref().to_lowercase();
        self
    }

    /// Builder method: exact status
    pub fn status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    /// Builder method: status when given, any status otherwise
    pub fn maybe_status(mut self, status: Option<S>) -> Self {
        self.status = status;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.status.is_none()
    }

    /// Check if an item matches this filter
    pub fn matches<T>(&self, item: &T) -> bool
    where
        T: Searchable<Status = S>,
    {
        if let Some(ref wanted) = self.status {
            if item.status() != Some(wanted) {
                return false;
            }
        }

        if self.text.is_empty() {
            return true;
        }

        item.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.text))
    }
}

impl Searchable for BillView {
    type Status = PaymentStatus;

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Owned(self.bill.id.to_string()),
            Cow::Owned(self.bill.total_amount.to_string()),
        ];
        fields.extend(self.guest_name().map(Cow::Borrowed));
        fields.extend(self.room_number().map(Cow::Borrowed));
        fields
    }

    fn status(&self) -> Option<&PaymentStatus> {
        Some(&self.bill.payment_status)
    }
}

impl Searchable for RoomView {
    type Status = RoomStatus;

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.room.room_number.as_str()),
            Cow::Borrowed(self.room.room_type.as_str()),
            Cow::Borrowed(self.room.status.as_str()),
        ]
    }

    fn status(&self) -> Option<&RoomStatus> {
        Some(&self.room.status)
    }
}

impl Searchable for ReservationView {
    type Status = ReservationStatus;

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let reservation = &self.reservation;
        let mut fields = vec![
            Cow::Owned(reservation.check_in_date.format("%Y-%m-%d").to_string()),
            Cow::Owned(reservation.check_out_date.format("%Y-%m-%d").to_string()),
            Cow::Borrowed(reservation.status.as_str()),
        ];
        fields.extend(reservation.guest_name().map(Cow::Borrowed));
        fields.extend(reservation.room_number().map(Cow::Borrowed));
        fields
    }

    fn status(&self) -> Option<&ReservationStatus> {
        Some(&self.reservation.status)
    }
}

impl Searchable for Guest {
    type Status = Infallible;

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Owned(self.id.to_string()),
            Cow::Borrowed(self.full_name.as_str()),
            Cow::Borrowed(self.email.as_str()),
            Cow::Borrowed(self.phone.as_str()),
        ]
    }

    fn status(&self) -> Option<&Infallible> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bill, Reservation, RoomSnapshot};
    use chrono::{TimeZone, Utc};

    fn bill_view(id: i64, amount: f64, status: PaymentStatus, guest: Option<&str>) -> BillView {
        let reservation = guest.map(|name| Reservation {
            id: id * 10,
            guest_id: id,
            room_id: id,
            check_in_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            check_out_date: Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap(),
            status: ReservationStatus::CheckedOut,
            guest: Some(crate::models::GuestSnapshot {
                id,
                full_name: name.to_string(),
                email: None,
            }),
            room: Some(RoomSnapshot {
                id,
                room_number: format!("{}05", id),
                room_type: "Double".to_string(),
                price_per_night: 150.0,
            }),
        });

        BillView {
            bill: Bill {
                id,
                reservation_id: reservation.as_ref().map(|r| r.id),
                total_amount: amount,
                payment_status: status,
                generated_at: Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap(),
            },
            reservation,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ListFilter::<PaymentStatus>::new().text("");
        assert!(filter.is_empty());
        assert!(filter.matches(&bill_view(1, 10.0, PaymentStatus::Paid, None)));
    }

    #[test]
    fn test_surrounding_whitespace_is_part_of_the_search() {
        let view = bill_view(1, 450.0, PaymentStatus::Pending, Some("Jane Smith"));

        assert!(!ListFilter::new().text(" 105").matches(&view));
        assert!(ListFilter::new().text("jane ").matches(&view));
        assert!(!ListFilter::<PaymentStatus>::new().text("  ").is_empty());
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let view = bill_view(1, 450.0, PaymentStatus::Pending, Some("Jane Smith"));

        assert!(ListFilter::new().text("JANE").matches(&view));
        assert!(ListFilter::new().text("105").matches(&view));
        assert!(ListFilter::new().text("450").matches(&view));
        assert!(!ListFilter::new().text("robert").matches(&view));
    }

    #[test]
    fn test_amount_matches_as_plain_decimal() {
        let view = bill_view(7, 99.5, PaymentStatus::Pending, None);
        assert!(ListFilter::new().text("99.5").matches(&view));
        assert!(!ListFilter::new().text("99.50").matches(&view));
    }

    #[test]
    fn test_status_and_text_must_both_hold() {
        let view = bill_view(1, 450.0, PaymentStatus::Pending, Some("Jane Smith"));

        let filter = ListFilter::new().text("jane").status(PaymentStatus::Paid);
        assert!(!filter.matches(&view));

        let filter = ListFilter::new().text("jane").status(PaymentStatus::Pending);
        assert!(filter.matches(&view));
    }

    #[test]
    fn test_unenriched_bill_matches_on_own_fields_only() {
        let view = bill_view(12, 80.0, PaymentStatus::Paid, None);
        assert!(ListFilter::new().text("12").matches(&view));
        assert!(!ListFilter::new().text("n/a").matches(&view));
    }

    fn reservation_view(
        status: ReservationStatus,
        guest: Option<&str>,
        room: Option<&str>,
    ) -> ReservationView {
        ReservationView::from(Reservation {
            id: 3,
            guest_id: 1,
            room_id: 1,
            check_in_date: Utc.with_ymd_and_hms(2024, 3, 14, 0, 0, 0).unwrap(),
            check_out_date: Utc.with_ymd_and_hms(2024, 3, 17, 0, 0, 0).unwrap(),
            status,
            guest: guest.map(|name| crate::models::GuestSnapshot {
                id: 1,
                full_name: name.to_string(),
                email: None,
            }),
            room: room.map(|number| RoomSnapshot {
                id: 1,
                room_number: number.to_string(),
                room_type: "Single".to_string(),
                price_per_night: 90.0,
            }),
        })
    }

    #[test]
    fn test_reservation_matches_stay_dates() {
        let view = reservation_view(ReservationStatus::Confirmed, Some("Jane Smith"), Some("203"));

        assert!(ListFilter::new().text("2024-03-14").matches(&view));
        assert!(ListFilter::new().text("03-17").matches(&view));
        assert!(!ListFilter::new().text("2024-03-15").matches(&view));
    }

    #[test]
    fn test_reservation_matches_guest_room_and_status() {
        let view = reservation_view(ReservationStatus::CheckedIn, Some("Jane Smith"), Some("203"));

        assert!(ListFilter::new().text("smith").matches(&view));
        assert!(ListFilter::new().text("203").matches(&view));
        assert!(ListFilter::new().text("Checked-In").matches(&view));
    }

    #[test]
    fn test_reservation_without_snapshots_matches_own_fields_only() {
        let view = reservation_view(ReservationStatus::Confirmed, None, None);

        assert!(!ListFilter::new().text("smith").matches(&view));
        assert!(!ListFilter::new().text("203").matches(&view));
        assert!(ListFilter::new().text("confirmed").matches(&view));
    }

    #[test]
    fn test_reservation_status_filter_excludes_text_match() {
        let view = reservation_view(ReservationStatus::CheckedIn, Some("Jane Smith"), Some("203"));

        let filter = ListFilter::new()
            .text("checked-in")
            .status(ReservationStatus::Cancelled);
        assert!(!filter.matches(&view));

        let filter = ListFilter::new()
            .text("checked-in")
            .status(ReservationStatus::CheckedIn);
        assert!(filter.matches(&view));
    }

    #[test]
    fn test_guest_filter() {
        let guest = Guest {
            id: 42,
            full_name: "Robert Johnson".to_string(),
            email: "rob@example.com".to_string(),
            phone: "555-0142".to_string(),
            address: "9 Elm St".to_string(),
            loyalty_info: None,
        };

        assert!(ListFilter::new().text("EXAMPLE.COM").matches(&guest));
        assert!(ListFilter::new().text("0142").matches(&guest));
        // Address is not a search field
        assert!(!ListFilter::new().text("elm").matches(&guest));
    }
}
