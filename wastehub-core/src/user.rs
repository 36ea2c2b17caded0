use serde::{Deserialize, Serialize};

/// Profile returned by `GET /user/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    /// Facility the user belongs to, once one is registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<i64>,
}
