//! Derived-Field Calculator
//!
//! Pure functions over raw service records. Nothing here performs I/O or
//! reads the clock; callers pass `now` explicitly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::{Reservation, Review, RoomStatistics};

const DAY_MS: i64 = 86_400_000;

const YEAR_SECS: i64 = 31_536_000;
const MONTH_SECS: i64 = 2_592_000;
const DAY_SECS: i64 = 86_400;
const HOUR_SECS: i64 = 3_600;
const MINUTE_SECS: i64 = 60;

/// Number of nights between check-in and check-out
///
/// The ceiling of the difference in days, so a partial day counts as a
/// full night. An inverted range yields zero or a negative count; see
/// [`validate_stay`] for callers that want to reject it.
pub fn nights_between(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let ms = (check_out - check_in).num_milliseconds();
    -((-ms).div_euclid(DAY_MS))
}

/// Price of a stay; rounding happens only in [`format_money`]
pub fn total_price(nights: i64, price_per_night: f64) -> f64 {
    nights as f64 * price_per_night
}

/// Human-readable age of a timestamp relative to `now`
///
/// Months are 30 days and years 365 days. A single month or year falls
/// through to the next finer unit ("12 months ago", "30 days ago").
/// Timestamps in the future read as "Just now".
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_milliseconds().div_euclid(1000);

    let years = seconds.div_euclid(YEAR_SECS);
    if years > 1 {
        return format!("{} years ago", years);
    }

    let months = seconds.div_euclid(MONTH_SECS);
    if months > 1 {
        return format!("{} months ago", months);
    }

    let days = seconds.div_euclid(DAY_SECS);
    if days > 1 {
        return format!("{} days ago", days);
    }
    if days == 1 {
        return "Yesterday".to_string();
    }

    let hours = seconds.div_euclid(HOUR_SECS);
    if hours > 1 {
        return format!("{} hours ago", hours);
    }
    if hours == 1 {
        return "1 hour ago".to_string();
    }

    let minutes = seconds.div_euclid(MINUTE_SECS);
    if minutes > 1 {
        return format!("{} minutes ago", minutes);
    }
    if minutes == 1 {
        return "1 minute ago".to_string();
    }

    "Just now".to_string()
}

/// A stay whose check-out is not after its check-in
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Check-out date {check_out} must be after check-in date {check_in}")]
pub struct StayError {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Reject inverted or empty stays, returning the night count otherwise
pub fn validate_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<i64, StayError> {
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return Err(StayError {
            check_in,
            check_out,
        });
    }
    Ok(nights)
}

/// Nights of a reservation
pub fn reservation_nights(reservation: &Reservation) -> i64 {
    nights_between(reservation.check_in_date, reservation.check_out_date)
}

/// Total price of a reservation, when the room rate is known
pub fn reservation_total(reservation: &Reservation) -> Option<f64> {
    reservation
        .room
        .as_ref()
        .map(|room| total_price(reservation_nights(reservation), room.price_per_night))
}

/// Amount to pre-fill when raising a bill against a reservation
///
/// `None` when the room, or a non-zero nightly rate, is unknown.
pub fn suggest_bill_amount(reservation: &Reservation) -> Option<f64> {
    let room = reservation.room.as_ref()?;
    if room.price_per_night <= 0.0 {
        return None;
    }
    Some(total_price(reservation_nights(reservation), room.price_per_night))
}

/// Mean overall rating, `None` without reviews
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| r.overall_rating as u32).sum();
    Some(sum as f64 / reviews.len() as f64)
}

/// One slice of the occupancy chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OccupancySlice {
    pub label: &'static str,
    pub count: u32,
    /// Share of all rooms, 0 to 100
    pub percent: f64,
}

/// Available/reserved/occupied/maintenance split of the room inventory
///
/// Percentages are relative to the sum of the four buckets, so they add up
/// to 100 even if `total_rooms` disagrees.
pub fn occupancy_breakdown(stats: &RoomStatistics) -> Vec<OccupancySlice> {
    let buckets = [
        ("Available", stats.available_rooms),
        ("Reserved", stats.reserved_rooms),
        ("Occupied", stats.occupied_rooms),
        ("Maintenance", stats.maintenance_rooms),
    ];
    let sum: u32 = buckets.iter().map(|(_, count)| count).sum();

    buckets
        .into_iter()
        .map(|(label, count)| OccupancySlice {
            label,
            count,
            percent: if sum == 0 {
                0.0
            } else {
                count as f64 * 100.0 / sum as f64
            },
        })
        .collect()
}

/// Occupied rooms as a percentage of the inventory
pub fn occupancy_rate(stats: &RoomStatistics) -> f64 {
    if stats.total_rooms == 0 {
        return 0.0;
    }
    stats.occupied_rooms as f64 * 100.0 / stats.total_rooms as f64
}

/// `$1234.50`
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Whole dollars with thousands separators: `$24,500`
pub fn format_revenue(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// `1 night`, `3 nights`
pub fn format_nights(nights: i64) -> String {
    if nights == 1 {
        "1 night".to_string()
    } else {
        format!("{} nights", nights)
    }
}

/// Upper-case the first letter of a status label
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
