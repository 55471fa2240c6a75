use serde::Serialize;

use super::Aggregator;
use crate::client::Fault;
use crate::models::{Guest, Review};

/// Guest detail with independently available sections
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetail {
    pub guest: Guest,
    /// False when loyalty info could not be resolved
    pub loyalty_available: bool,
    pub reviews: Vec<Review>,
    /// False when the review lookup failed; an empty list with this set
    /// means the guest has no reviews
    pub reviews_available: bool,
}

impl Aggregator {
    /// One guest with loyalty info, plus their reviews
    ///
    /// The two lookups run concurrently and fail independently. Only a
    /// guest that cannot be fetched at all fails the detail.
    pub async fn guest_detail(&self, guest_id: i64) -> Result<GuestDetail, Fault> {
        let (guest, reviews) = tokio::join!(
            self.client.guest_with_loyalty(guest_id),
            self.client.reviews_by_guest(guest_id),
        );

        let guest = match guest {
            Ok(found) => found,
            // Loyalty resolution can fail the whole call; retry without it
            Err(Fault::Application(messages)) => {
                tracing::warn!(
                    guest_id,
                    error = %messages.join("; "),
                    "Guest lookup with loyalty failed, retrying without loyalty"
                );
                self.client.guest(guest_id).await?
            }
            Err(fault) => return Err(fault),
        };

        let guest =
            guest.ok_or_else(|| Fault::application(format!("Guest {} not found", guest_id)))?;
        let loyalty_available = guest.loyalty_info.is_some();

        let (reviews, reviews_available) = match reviews {
            Ok(reviews) => (reviews, true),
            Err(fault) => {
                tracing::warn!(
                    guest_id,
                    fault = fault.kind(),
                    error = %fault,
                    "Review lookup failed"
                );
                (Vec::new(), false)
            }
        };

        Ok(GuestDetail {
            guest,
            loyalty_available,
            reviews,
            reviews_available,
        })
    }
}
