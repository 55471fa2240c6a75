use futures_util::stream::{self, StreamExt};
use serde::Serialize;

use super::Aggregator;
use crate::client::Fault;
use crate::models::{Bill, Reservation};

/// A bill with the reservation it was raised against, when that could be
/// resolved
///
/// The reservation is a read-time snapshot and is never sent back to the
/// billing service.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillView {
    #[serde(flatten)]
    pub bill: Bill,
    pub reservation: Option<Reservation>,
}

impl BillView {
    pub fn guest_name(&self) -> Option<&str> {
        self.reservation.as_ref().and_then(|r| r.guest_name())
    }

    pub fn room_number(&self) -> Option<&str> {
        self.reservation.as_ref().and_then(|r| r.room_number())
    }
}

impl Aggregator {
    /// All bills, each enriched with its reservation
    ///
    /// Reservation lookups run concurrently (bounded by the enrichment
    /// limit) but the result keeps the billing service's order. A failed or
    /// empty lookup leaves that bill's reservation absent.
    pub async fn list_bills(&self) -> Result<Vec<BillView>, Fault> {
        let bills = self.client.bills().await?;
        let total = bills.len();

        let views: Vec<BillView> = stream::iter(bills)
            .map(|bill| self.enrich_bill(bill))
            .buffered(self.enrichment_limit)
            .collect()
            .await;

        let enriched = views.iter().filter(|v| v.reservation.is_some()).count();
        tracing::info!(bills = total, enriched, "Loaded bill listing");

        Ok(views)
    }

    async fn enrich_bill(&self, bill: Bill) -> BillView {
        let Some(reservation_id) = bill.reservation_id else {
            return BillView {
                bill,
                reservation: None,
            };
        };

        let reservation = match self.client.reservation(reservation_id).await {
            Ok(Some(reservation)) => Some(reservation),
            Ok(None) => {
                tracing::debug!(
                    bill_id = bill.id,
                    reservation_id,
                    "Bill references a missing reservation"
                );
                None
            }
            Err(fault) => {
                tracing::warn!(
                    bill_id = bill.id,
                    reservation_id,
                    fault = fault.kind(),
                    error = %fault,
                    "Reservation enrichment failed"
                );
                None
            }
        };

        BillView { bill, reservation }
    }

    /// Reservations a bill may be raised against
    pub async fn billable_reservations(&self) -> Result<Vec<Reservation>, Fault> {
        let reservations = self.client.reservations().await?;
        Ok(reservations
            .into_iter()
            .filter(|r| r.status.is_billable())
            .collect())
    }
}
