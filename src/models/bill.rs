use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ParseStatusError;

/// A bill as stored by the billing service
///
/// The billing service only knows the reservation by reference; the
/// reservation snapshot shown next to a bill is attached at read time by
/// [`crate::aggregate::BillView`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: i64,
    #[serde(default)]
    pub reservation_id: Option<i64>,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    #[serde(deserialize_with = "super::dates::deserialize")]
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn all() -> &'static [PaymentStatus] {
        &[
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Cancelled,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PaymentStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ParseStatusError {
                kind: "payment",
                value: s.to_string(),
            })
    }
}
