use serde::{Deserialize, Serialize};

/// A lab inside a facility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lab {
    pub id: i64,
    pub facility_id: i64,
    pub name: String,
    pub location: String,
}

/// Payload for `POST /labs/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterLab {
    pub name: String,
    pub location: String,
}

/// Partial update for a lab. `None` fields stay off the wire and are left
/// untouched by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLab {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}
