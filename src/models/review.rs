use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A guest review of a stay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: i64,
    #[serde(default)]
    pub stay_id: Option<i64>,
    /// 1 to 5
    pub overall_rating: u8,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(deserialize_with = "super::dates::deserialize")]
    pub review_date: DateTime<Utc>,
    #[serde(default)]
    pub room: Option<ReviewedRoom>,
    #[serde(default)]
    pub aspects: Vec<ReviewAspect>,
}

/// Per-aspect sub-rating attached to a review
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAspect {
    pub aspect_id: i64,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedRoom {
    pub room_number: String,
}
