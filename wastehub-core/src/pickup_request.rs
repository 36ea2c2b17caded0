use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// State of a collection request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupRequestStatus {
    Pending,
    Approved,
    Done,
    Cancelled,
}

/// A facility's request to have a batch of disposals collected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupRequest {
    pub id: i64,
    pub facility_id: i64,
    pub disposal_ids: Vec<i64>,
    pub requested_date: NaiveDate,
    pub status: PickupRequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payload for `POST /pickup-requests`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePickupRequest {
    pub disposal_ids: Vec<i64>,
    pub requested_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Partial update for a collection request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePickupRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposal_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_request_wire_shape() {
        let request: PickupRequest = serde_json::from_str(
            r#"{"id":400,"facilityId":10,"disposalIds":[200,201],"requestedDate":"2025-10-18","status":"APPROVED"}"#,
        )
        .unwrap();
        assert_eq!(request.disposal_ids, vec![200, 201]);
        assert_eq!(request.status, PickupRequestStatus::Approved);
        assert_eq!(request.note, None);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["disposalIds"][1], 201);
        assert!(json.get("note").is_none());
    }

    #[test]
    fn test_create_request_keeps_note() {
        let create = CreatePickupRequest {
            disposal_ids: vec![202],
            requested_date: NaiveDate::from_ymd_opt(2025, 10, 19).unwrap(),
            note: Some("gate code 4412".to_string()),
        };
        let json = serde_json::to_value(&create).unwrap();
        assert_eq!(json["note"], "gate code 4412");
        assert_eq!(json["requestedDate"], "2025-10-19");
    }
}
