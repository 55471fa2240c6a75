//! Aggregator
//!
//! Builds view-models by calling a primary service and, per item,
//! opportunistically calling secondary services for related data.
//!
//! Failure policy:
//! - a fault on the primary fetch propagates to the caller
//! - a fault on a secondary (enrichment) fetch is logged and leaves the
//!   related field absent
//! - dashboard statistics degrade to fixed placeholders, see [`Feed`]

mod bills;
mod dashboard;
mod guests;
mod listings;

pub use bills::BillView;
pub use dashboard::{placeholders, DashboardSummary, Feed};
pub use guests::GuestDetail;
pub use listings::{ReservationView, RoomView};

use crate::client::{Fault, ServiceClient};
use crate::config::ServicesConfig;

/// Composes view-models from the four services
#[derive(Clone)]
pub struct Aggregator {
    client: ServiceClient,
    enrichment_limit: usize,
}

impl Aggregator {
    /// `enrichment_limit` bounds concurrent secondary lookups per listing
    pub fn new(client: ServiceClient, enrichment_limit: usize) -> Self {
        Self {
            client,
            enrichment_limit: enrichment_limit.max(1),
        }
    }

    /// Aggregator over HTTP clients for the configured endpoints
    pub fn from_config(config: &ServicesConfig) -> Result<Self, Fault> {
        Ok(Self::new(
            ServiceClient::http(config)?,
            config.max_concurrent_enrichment,
        ))
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    pub fn enrichment_limit(&self) -> usize {
        self.enrichment_limit
    }
}
