use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A guest record from the guest service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    /// Resolved by the guest service from the loyalty subsystem; `None`
    /// when that subsystem is down or was not asked for
    #[serde(default)]
    pub loyalty_info: Option<LoyaltyInfo>,
}

/// Loyalty programme standing of a guest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyInfo {
    pub points: i64,
    pub tier: String,
    #[serde(default, deserialize_with = "super::dates::deserialize_option")]
    pub member_since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub points_required: i64,
}

/// The guest fields the reservation service resolves onto a reservation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuestSnapshot {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
}
