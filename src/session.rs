//! View sessions
//!
//! A [`ViewSession`] owns the view-model store of one view and runs every
//! fetch and write for it. Closing the session (navigating away) cancels
//! whatever is in flight, and nothing is written into a closed session's
//! store.
//!
//! Writes never touch the store directly: a successful create, update or
//! delete is followed by a full re-fetch of the affected listing.

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use crate::aggregate::{Aggregator, BillView, DashboardSummary, GuestDetail, ReservationView, RoomView};
use crate::calc::{self, StayError};
use crate::client::Fault;
use crate::models::{
    Bill, BillInput, BillUpdate, Guest, GuestInput, GuestUpdate, PaymentStatus, Reservation,
    ReservationInput, ReservationUpdate, Room, RoomInput, RoomUpdate,
};
use crate::store::{Collection, ViewStore};

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Fault(#[from] Fault),

    #[error("View closed before the operation completed")]
    Cancelled,

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error(transparent)]
    InvalidStay(#[from] StayError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Cancellation scope tied to a view's lifetime
///
/// Clones share the same scope, so a clone can close the view from another
/// task.
#[derive(Debug, Clone)]
pub struct ViewScope {
    closed: Arc<watch::Sender<bool>>,
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewScope {
    pub fn new() -> Self {
        let (closed, _) = watch::channel(false);
        Self {
            closed: Arc::new(closed),
        }
    }

    /// Close the scope, cancelling everything running under it
    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Run a future until it completes or the scope closes
    pub async fn run<F>(&self, fut: F) -> SessionResult<F::Output>
    where
        F: Future,
    {
        let mut closed = self.closed.subscribe();
        if *closed.borrow_and_update() {
            return Err(SessionError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = closed.wait_for(|closed| *closed) => Err(SessionError::Cancelled),
            output = fut => Ok(output),
        }
    }
}

/// Replace a collection with the result of `fetch`, unless the scope
/// closed meanwhile
async fn load<T, Fut>(
    scope: &ViewScope,
    collection: &mut Collection<T>,
    fetch: Fut,
) -> SessionResult<usize>
where
    Fut: Future<Output = Result<Vec<T>, Fault>>,
{
    let items = scope.run(fetch).await??;
    if scope.is_closed() {
        return Err(SessionError::Cancelled);
    }

    let count = items.len();
    collection.replace(items);
    Ok(count)
}

fn log_refresh(listing: &'static str, result: SessionResult<usize>) {
    if let Err(e) = result {
        tracing::warn!(
            listing,
            error = %e,
            "Refresh after write failed, keeping previous listing"
        );
    }
}

/// Store, aggregator and cancellation scope of one view
pub struct ViewSession {
    aggregator: Aggregator,
    store: ViewStore,
    scope: ViewScope,
}

impl ViewSession {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator,
            store: ViewStore::new(),
            scope: ViewScope::new(),
        }
    }

    pub fn store(&self) -> &ViewStore {
        &self.store
    }

    /// Handle for closing this session from elsewhere
    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    pub fn close(&self) {
        self.scope.close();
    }

    pub fn is_closed(&self) -> bool {
        self.scope.is_closed()
    }

    // Listings

    pub async fn refresh_bills(&mut self) -> SessionResult<usize> {
        load(&self.scope, &mut self.store.bills, self.aggregator.list_bills()).await
    }

    pub async fn refresh_rooms(&mut self) -> SessionResult<usize> {
        load(&self.scope, &mut self.store.rooms, self.aggregator.list_rooms()).await
    }

    pub async fn refresh_reservations(&mut self) -> SessionResult<usize> {
        load(
            &self.scope,
            &mut self.store.reservations,
            self.aggregator.list_reservations(),
        )
        .await
    }

    pub async fn refresh_guests(&mut self) -> SessionResult<usize> {
        load(&self.scope, &mut self.store.guests, self.aggregator.list_guests()).await
    }

    pub fn bills(&self) -> &Collection<BillView> {
        &self.store.bills
    }

    pub fn rooms(&self) -> &Collection<RoomView> {
        &self.store.rooms
    }

    pub fn reservations(&self) -> &Collection<ReservationView> {
        &self.store.reservations
    }

    pub fn guests(&self) -> &Collection<Guest> {
        &self.store.guests
    }

    // Composite reads

    pub async fn dashboard(&self) -> SessionResult<DashboardSummary> {
        self.scope.run(self.aggregator.dashboard_summary()).await
    }

    pub async fn guest_detail(&self, guest_id: i64) -> SessionResult<GuestDetail> {
        Ok(self.scope.run(self.aggregator.guest_detail(guest_id)).await??)
    }

    pub async fn billable_reservations(&self) -> SessionResult<Vec<Reservation>> {
        Ok(self.scope.run(self.aggregator.billable_reservations()).await??)
    }

    pub async fn available_rooms(&self) -> SessionResult<Vec<Room>> {
        Ok(self.scope.run(self.aggregator.available_rooms()).await??)
    }

    /// Amount to pre-fill for a bill against a reservation
    pub async fn suggest_bill_amount(&self, reservation_id: i64) -> SessionResult<Option<f64>> {
        let reservation = self
            .scope
            .run(self.aggregator.client().reservation(reservation_id))
            .await??
            .ok_or(SessionError::NotFound {
                kind: "Reservation",
                id: reservation_id,
            })?;

        Ok(calc::suggest_bill_amount(&reservation))
    }

    // Bills

    pub async fn create_bill(&mut self, input: &BillInput) -> SessionResult<Bill> {
        let bill = self
            .scope
            .run(self.aggregator.client().create_bill(input))
            .await??;
        tracing::info!(bill_id = bill.id, reservation_id = input.reservation_id, "Created bill");

        log_refresh("bills", self.refresh_bills().await);
        Ok(bill)
    }

    pub async fn update_bill(&mut self, id: i64, update: &BillUpdate) -> SessionResult<Bill> {
        let bill = self
            .scope
            .run(self.aggregator.client().update_bill(id, update))
            .await??
            .ok_or(SessionError::NotFound { kind: "Bill", id })?;
        tracing::info!(bill_id = id, "Updated bill");

        log_refresh("bills", self.refresh_bills().await);
        Ok(bill)
    }

    pub async fn set_payment_status(&mut self, id: i64, status: PaymentStatus) -> SessionResult<Bill> {
        self.update_bill(id, &BillUpdate::payment_status(status)).await
    }

    pub async fn delete_bill(&mut self, id: i64) -> SessionResult<()> {
        let deleted = self
            .scope
            .run(self.aggregator.client().delete_bill(id))
            .await??;
        if !deleted {
            return Err(SessionError::NotFound { kind: "Bill", id });
        }
        tracing::info!(bill_id = id, "Deleted bill");

        log_refresh("bills", self.refresh_bills().await);
        Ok(())
    }

    // Rooms

    pub async fn create_room(&mut self, input: &RoomInput) -> SessionResult<Room> {
        let room = self
            .scope
            .run(self.aggregator.client().create_room(input))
            .await??;
        tracing::info!(room_id = room.id, room_number = %room.room_number, "Created room");

        log_refresh("rooms", self.refresh_rooms().await);
        Ok(room)
    }

    pub async fn update_room(&mut self, id: i64, update: &RoomUpdate) -> SessionResult<Room> {
        let room = self
            .scope
            .run(self.aggregator.client().update_room(id, update))
            .await??
            .ok_or(SessionError::NotFound { kind: "Room", id })?;
        tracing::info!(room_id = id, "Updated room");

        log_refresh("rooms", self.refresh_rooms().await);
        Ok(room)
    }

    pub async fn delete_room(&mut self, id: i64) -> SessionResult<()> {
        let deleted = self
            .scope
            .run(self.aggregator.client().delete_room(id))
            .await??;
        if !deleted {
            return Err(SessionError::NotFound { kind: "Room", id });
        }
        tracing::info!(room_id = id, "Deleted room");

        log_refresh("rooms", self.refresh_rooms().await);
        Ok(())
    }

    // Reservations

    /// Rejects stays whose check-out is not after check-in before sending
    pub async fn create_reservation(&mut self, input: &ReservationInput) -> SessionResult<Reservation> {
        calc::validate_stay(input.check_in_date, input.check_out_date)?;

        let reservation = self
            .scope
            .run(self.aggregator.client().create_reservation(input))
            .await??;
        tracing::info!(
            reservation_id = reservation.id,
            guest_id = input.guest_id,
            room_id = input.room_id,
            "Created reservation"
        );

        log_refresh("reservations", self.refresh_reservations().await);
        Ok(reservation)
    }

    /// Stay dates are validated when both are being changed
    pub async fn update_reservation(
        &mut self,
        id: i64,
        update: &ReservationUpdate,
    ) -> SessionResult<Reservation> {
        if let (Some(check_in), Some(check_out)) = (update.check_in_date, update.check_out_date) {
            calc::validate_stay(check_in, check_out)?;
        }

        let reservation = self
            .scope
            .run(self.aggregator.client().update_reservation(id, update))
            .await??
            .ok_or(SessionError::NotFound {
                kind: "Reservation",
                id,
            })?;
        tracing::info!(reservation_id = id, "Updated reservation");

        log_refresh("reservations", self.refresh_reservations().await);
        Ok(reservation)
    }

    pub async fn delete_reservation(&mut self, id: i64) -> SessionResult<()> {
        let deleted = self
            .scope
            .run(self.aggregator.client().delete_reservation(id))
            .await??;
        if !deleted {
            return Err(SessionError::NotFound {
                kind: "Reservation",
                id,
            });
        }
        tracing::info!(reservation_id = id, "Deleted reservation");

        log_refresh("reservations", self.refresh_reservations().await);
        Ok(())
    }

    // Guests

    pub async fn create_guest(&mut self, input: &GuestInput) -> SessionResult<Guest> {
        let guest = self
            .scope
            .run(self.aggregator.client().create_guest(input))
            .await??;
        tracing::info!(guest_id = guest.id, "Created guest");

        log_refresh("guests", self.refresh_guests().await);
        Ok(guest)
    }

    pub async fn update_guest(&mut self, id: i64, update: &GuestUpdate) -> SessionResult<Guest> {
        let guest = self
            .scope
            .run(self.aggregator.client().update_guest(id, update))
            .await??
            .ok_or(SessionError::NotFound { kind: "Guest", id })?;
        tracing::info!(guest_id = id, "Updated guest");

        log_refresh("guests", self.refresh_guests().await);
        Ok(guest)
    }

    pub async fn delete_guest(&mut self, id: i64) -> SessionResult<()> {
        let deleted = self
            .scope
            .run(self.aggregator.client().delete_guest(id))
            .await??;
        if !deleted {
            return Err(SessionError::NotFound { kind: "Guest", id });
        }
        tracing::info!(guest_id = id, "Deleted guest");

        log_refresh("guests", self.refresh_guests().await);
        Ok(())
    }
}

impl Drop for ViewSession {
    fn drop(&mut self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::ScriptedTransport;
    use crate::client::{Operation, ServiceClient};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    fn bill(id: i64, status: &str) -> Value {
        json!({
            "id": id,
            "reservationId": null,
            "totalAmount": 120.0,
            "paymentStatus": status,
            "generatedAt": "2024-01-03T09:00:00"
        })
    }

    fn session(transport: ScriptedTransport) -> ViewSession {
        ViewSession::new(Aggregator::new(ServiceClient::new(Arc::new(transport)), 4))
    }

    #[tokio::test]
    async fn test_refresh_fills_store() {
        let transport = ScriptedTransport::new(|_, _| Ok(json!({"bills": [bill(1, "paid"), bill(2, "pending")]})));
        let mut session = session(transport);

        assert_eq!(session.refresh_bills().await.unwrap(), 2);
        assert!(session.bills().is_loaded());
        assert_eq!(session.bills().items()[1].bill.id, 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_collection() {
        let fail = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fail);
        let transport = ScriptedTransport::new(move |_, _| {
            if flag.load(Ordering::SeqCst) {
                Err(Fault::Transport(500))
            } else {
                Ok(json!({"bills": [bill(1, "paid")]}))
            }
        });
        let mut session = session(transport);

        session.refresh_bills().await.unwrap();
        fail.store(true, Ordering::SeqCst);

        let err = session.refresh_bills().await.unwrap_err();
        assert!(matches!(err, SessionError::Fault(Fault::Transport(500))));
        assert_eq!(session.bills().len(), 1);
    }

    #[tokio::test]
    async fn test_successful_write_refetches_listing() {
        let transport = ScriptedTransport::new(|_, op| match op.name() {
            "Bills" => Ok(json!({"bills": [bill(1, "paid")]})),
            "UpdateBill" => Ok(json!({"updateBill": bill(1, "paid")})),
            other => panic!("unexpected operation {}", other),
        });
        let mut session = session(transport.clone());

        session.refresh_bills().await.unwrap();
        let updated = session.set_payment_status(1, PaymentStatus::Paid).await.unwrap();

        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        assert_eq!(transport.operation_names(), vec!["Bills", "UpdateBill", "Bills"]);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_store_untouched() {
        let transport = ScriptedTransport::new(|_, op| match op.name() {
            "Bills" => Ok(json!({"bills": [bill(1, "pending")]})),
            _ => Err(Fault::application("Reservation 99 does not exist")),
        });
        let mut session = session(transport.clone());
        session.refresh_bills().await.unwrap();
        let fetched_at = session.bills().fetched_at();

        let err = session
            .create_bill(&BillInput {
                reservation_id: 99,
                total_amount: 10.0,
                payment_status: PaymentStatus::Pending,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Fault(Fault::Application(_))));
        assert_eq!(session.bills().fetched_at(), fetched_at);
        assert_eq!(transport.call_count("Bills"), 1);
    }

    #[tokio::test]
    async fn test_missing_targets_are_not_found() {
        let transport = ScriptedTransport::new(|_, op| match op.name() {
            "UpdateRoom" => Ok(json!({"updateRoom": null})),
            "DeleteGuest" => Ok(json!({"deleteGuest": false})),
            other => panic!("unexpected operation {}", other),
        });
        let mut session = session(transport.clone());

        let err = session.update_room(7, &RoomUpdate::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Room 7 not found");

        let err = session.delete_guest(8).await.unwrap_err();
        assert!(matches!(err, SessionError::NotFound { kind: "Guest", id: 8 }));

        // No refresh after a write that changed nothing
        assert_eq!(transport.operation_names(), vec!["UpdateRoom", "DeleteGuest"]);
    }

    #[tokio::test]
    async fn test_inverted_stay_is_rejected_before_sending() {
        let transport = ScriptedTransport::new(|_, op| panic!("unexpected operation {}", op.name()));
        let mut session = session(transport.clone());

        let err = session
            .create_reservation(&ReservationInput {
                guest_id: 1,
                room_id: 1,
                check_in_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                check_out_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                status: crate::models::ReservationStatus::Confirmed,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::InvalidStay(_)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_inverted_stay_update_is_rejected_before_sending() {
        let transport = ScriptedTransport::new(|_, op| panic!("unexpected operation {}", op.name()));
        let mut session = session(transport.clone());

        let err = session
            .update_reservation(
                4,
                &ReservationUpdate {
                    check_in_date: NaiveDate::from_ymd_opt(2024, 3, 10),
                    check_out_date: NaiveDate::from_ymd_opt(2024, 3, 10),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::InvalidStay(_)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_single_date_update_is_sent_unchecked() {
        let transport = ScriptedTransport::new(|_, op| match op.name() {
            "UpdateReservation" => Ok(json!({"updateReservation": null})),
            other => panic!("unexpected operation {}", other),
        });
        let mut session = session(transport.clone());

        let err = session
            .update_reservation(
                4,
                &ReservationUpdate {
                    check_out_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::NotFound { kind: "Reservation", id: 4 }));
        assert_eq!(transport.operation_names(), vec!["UpdateReservation"]);
    }

    #[tokio::test]
    async fn test_closing_cancels_in_flight_fetch() {
        let transport = ScriptedTransport::new(|_, _| Ok(json!({"bills": [bill(1, "paid")]})))
            .with_delay(|_, _| Some(Duration::from_secs(5)));
        let mut session = session(transport);

        let scope = session.scope();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            scope.close();
        });

        let err = session.refresh_bills().await.unwrap_err();
        assert!(matches!(err, SessionError::Cancelled));
        assert!(!session.bills().is_loaded());
    }

    #[tokio::test]
    async fn test_closed_session_issues_no_requests() {
        let transport = ScriptedTransport::new(|_, _| Ok(json!({"guests": []})));
        let mut session = session(transport.clone());

        session.close();

        assert!(matches!(
            session.refresh_guests().await,
            Err(SessionError::Cancelled)
        ));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_suggest_bill_amount() {
        let transport = ScriptedTransport::new(|_, op: &Operation| {
            match op.variable("id").and_then(Value::as_i64) {
                Some(12) => Ok(json!({"reservation": {
                    "id": 12, "guestId": 1, "roomId": 1,
                    "checkInDate": "2024-01-01", "checkOutDate": "2024-01-04",
                    "status": "checked-in",
                    "room": {"id": 1, "roomNumber": "101", "pricePerNight": 150.0}
                }})),
                _ => Ok(json!({"reservation": null})),
            }
        });
        let session = session(transport);

        assert_eq!(session.suggest_bill_amount(12).await.unwrap(), Some(450.0));
        assert!(matches!(
            session.suggest_bill_amount(13).await,
            Err(SessionError::NotFound { kind: "Reservation", id: 13 })
        ));
    }
}
