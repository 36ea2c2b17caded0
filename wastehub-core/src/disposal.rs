use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle of a registered waste item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisposalStatus {
    Registered,
    Requested,
    PickedUp,
}

/// A registered waste item awaiting (or past) collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disposal {
    pub id: i64,
    pub lab_id: i64,
    pub category: String,
    pub weight: f64,
    pub unit: String,
    pub status: DisposalStatus,
    /// Local timestamp without a timezone, exactly as the API emits it.
    pub registered_at: NaiveDateTime,
}

/// Payload for `POST /disposals`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDisposal {
    pub lab_id: i64,
    pub category: String,
    pub weight: f64,
    pub unit: String,
}

/// Partial update for a disposal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDisposal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}
