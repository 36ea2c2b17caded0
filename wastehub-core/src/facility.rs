use serde::{Deserialize, Serialize};

/// What kind of site a facility is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityKind {
    LabSite,
    PickupCompany,
    Other,
}

/// A registered facility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: i64,
    pub name: String,
    pub kind: FacilityKind,
    pub address: String,
}

/// Payload for `POST /facilities/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFacility {
    pub name: String,
    pub kind: FacilityKind,
    pub address: String,
}
