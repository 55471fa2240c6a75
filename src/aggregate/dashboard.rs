use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Aggregator;
use crate::calc::{self, OccupancySlice};
use crate::client::Fault;
use crate::models::{
    ActivityEntry, BillingStatistics, GuestStatistics, MonthlyRevenue, ReservationStatistics,
    RoomStatistics,
};

/// One dashboard data source, either fetched or substituted
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "source", content = "value")]
pub enum Feed<T> {
    Live(T),
    /// The fetch faulted and a placeholder was chosen instead
    DegradeToDefault(T),
}

impl<T> Feed<T> {
    pub fn value(&self) -> &T {
        match self {
            Feed::Live(value) | Feed::DegradeToDefault(value) => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Feed::DegradeToDefault(_))
    }
}

/// Everything the dashboard renders, always complete
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub room_stats: Feed<RoomStatistics>,
    pub guest_stats: Feed<GuestStatistics>,
    pub reservation_stats: Feed<ReservationStatistics>,
    pub billing_stats: Feed<BillingStatistics>,
    pub recent_activity: Feed<Vec<ActivityEntry>>,
    pub monthly_revenue: Feed<Vec<MonthlyRevenue>>,
    pub occupancy: Vec<OccupancySlice>,
    /// Occupied share of the inventory, in percent
    pub occupancy_rate: f64,
}

impl DashboardSummary {
    /// Names of the feeds showing placeholder data
    pub fn degraded_feeds(&self) -> Vec<&'static str> {
        [
            ("room_stats", self.room_stats.is_degraded()),
            ("guest_stats", self.guest_stats.is_degraded()),
            ("reservation_stats", self.reservation_stats.is_degraded()),
            ("billing_stats", self.billing_stats.is_degraded()),
            ("recent_activity", self.recent_activity.is_degraded()),
            ("monthly_revenue", self.monthly_revenue.is_degraded()),
        ]
        .into_iter()
        .filter_map(|(name, degraded)| degraded.then_some(name))
        .collect()
    }
}

fn degrade<T>(feed: &'static str, result: Result<T, Fault>, fallback: impl FnOnce() -> T) -> Feed<T> {
    match result {
        Ok(value) => Feed::Live(value),
        Err(fault) => {
            tracing::warn!(
                feed,
                fault = fault.kind(),
                error = %fault,
                "Dashboard feed unavailable, showing placeholder data"
            );
            Feed::DegradeToDefault(fallback())
        }
    }
}

impl Aggregator {
    /// Dashboard summary as of now
    pub async fn dashboard_summary(&self) -> DashboardSummary {
        self.dashboard_summary_at(Utc::now()).await
    }

    /// Dashboard summary, with placeholder activity timed relative to `now`
    ///
    /// All six fetches run concurrently. None of them can fail the summary.
    pub async fn dashboard_summary_at(&self, now: DateTime<Utc>) -> DashboardSummary {
        let (rooms, guests, reservations, billing, activity, revenue) = tokio::join!(
            self.client.room_statistics(),
            self.client.guest_statistics(),
            self.client.reservation_statistics(),
            self.client.billing_statistics(),
            self.client.recent_activity(),
            self.client.monthly_revenue(),
        );

        let room_stats = degrade("room_stats", rooms, placeholders::room_statistics);
        let occupancy = calc::occupancy_breakdown(room_stats.value());
        let occupancy_rate = calc::occupancy_rate(room_stats.value());

        let summary = DashboardSummary {
            room_stats,
            guest_stats: degrade("guest_stats", guests, placeholders::guest_statistics),
            reservation_stats: degrade(
                "reservation_stats",
                reservations,
                placeholders::reservation_statistics,
            ),
            billing_stats: degrade("billing_stats", billing, placeholders::billing_statistics),
            recent_activity: degrade("recent_activity", activity, || {
                placeholders::recent_activity(now)
            }),
            monthly_revenue: degrade("monthly_revenue", revenue, placeholders::monthly_revenue),
            occupancy,
            occupancy_rate,
        };

        let degraded = summary.degraded_feeds();
        if degraded.is_empty() {
            tracing::info!("Loaded dashboard");
        } else {
            tracing::info!(degraded = ?degraded, "Loaded dashboard with placeholder data");
        }

        summary
    }
}

/// Fixed sample data shown when a dashboard feed is unavailable
pub mod placeholders {
    use chrono::{DateTime, Duration, Utc};

    use crate::models::{
        ActivityEntry, BillingStatistics, GuestStatistics, MonthlyRevenue, ReservationStatistics,
        RoomStatistics,
    };

    pub fn room_statistics() -> RoomStatistics {
        RoomStatistics {
            total_rooms: 50,
            available_rooms: 15,
            reserved_rooms: 20,
            occupied_rooms: 12,
            maintenance_rooms: 3,
        }
    }

    pub fn guest_statistics() -> GuestStatistics {
        GuestStatistics {
            total_guests: 124,
            new_guests_this_month: 18,
            returning_guests: 106,
        }
    }

    pub fn reservation_statistics() -> ReservationStatistics {
        ReservationStatistics {
            total_reservations: 85,
            active_reservations: 32,
            upcoming_reservations: 28,
            completed_reservations: 20,
            cancelled_reservations: 5,
        }
    }

    pub fn billing_statistics() -> BillingStatistics {
        BillingStatistics {
            total_bills: 75,
            pending_payments: 8,
            paid_bills: 67,
            total_revenue: 24500.0,
        }
    }

    pub fn recent_activity(now: DateTime<Utc>) -> Vec<ActivityEntry> {
        let entry = |id: i64, guest: &str, room: &str, action: &str, hours: i64| ActivityEntry {
            id,
            guest_name: guest.to_string(),
            room_number: room.to_string(),
            action: action.to_string(),
            timestamp: now - Duration::hours(hours),
        };

        vec![
            entry(1, "John Doe", "101", "Check-in", 2),
            entry(2, "Jane Smith", "203", "Check-out", 4),
            entry(3, "Robert Johnson", "305", "Reservation", 24),
        ]
    }

    pub fn monthly_revenue() -> Vec<MonthlyRevenue> {
        [
            ("Jan", 12500.0),
            ("Feb", 19200.0),
            ("Mar", 15800.0),
            ("Apr", 21500.0),
            ("May", 18300.0),
            ("Jun", 24500.0),
        ]
        .into_iter()
        .map(|(month, revenue)| MonthlyRevenue {
            month: month.to_string(),
            revenue,
        })
        .collect()
    }
}
