//! # Frontdesk
//!
//! Aggregation and view-model layer for a hotel administration dashboard
//! built on four independent GraphQL services: rooms, reservations, guests
//! and billing.
//!
//! ## Features
//!
//! - **Typed service client**: bound variables only, one fault taxonomy
//! - **Cross-service enrichment**: bills joined with reservations, guests
//!   and rooms; a failed lookup degrades one field, never the listing
//! - **Always-complete dashboard**: each feed falls back to placeholder data
//!   under an explicit degrade policy
//! - **View sessions**: per-view store with client-side filtering and
//!   cancellation on close
//!
//! ## Modules
//!
//! - [`client`]: Remote Service Client
//! - [`aggregate`]: composite view-models
//! - [`calc`]: derived fields (nights, totals, relative time)
//! - [`store`]: view-model cache and filters
//! - [`session`]: per-view fetch and write orchestration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frontdesk::aggregate::Aggregator;
//! use frontdesk::config::Config;
//! use frontdesk::models::PaymentStatus;
//! use frontdesk::session::ViewSession;
//! use frontdesk::store::ListFilter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let mut session = ViewSession::new(Aggregator::from_config(&config.services)?);
//!
//!     session.refresh_bills().await?;
//!
//!     let filter = ListFilter::new().text("smith").status(PaymentStatus::Pending);
//!     for view in session.bills().apply_filter(&filter) {
//!         println!("{} {}", view.bill.id, view.guest_name().unwrap_or("N/A"));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod calc;
pub mod client;
pub mod config;
pub mod models;
pub mod session;
pub mod store;

// Re-export top-level types for convenience
pub use aggregate::{
    Aggregator, BillView, DashboardSummary, Feed, GuestDetail, ReservationView, RoomView,
};

pub use client::{Fault, FaultResult, HttpTransport, Operation, ServiceClient, ServiceKey, ServiceTransport};

pub use config::{Config, ConfigError, LoggingConfig, ServicesConfig};

pub use session::{SessionError, SessionResult, ViewScope, ViewSession};

pub use store::{Collection, ListFilter, Searchable, ViewStore};
