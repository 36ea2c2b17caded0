use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::disposal::DisposalStatus;

/// State of a scheduled pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupStatus {
    Scheduled,
    PickedUp,
    Missed,
}

/// A collection slot for one disposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    pub id: i64,
    pub disposal_id: i64,
    pub scheduled_for: NaiveDate,
    pub status: PickupStatus,
}

/// Marks a disposal as collected, by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub disposal_id: i64,
}

/// Outcome of a scan, whether submitted as JSON or as a label photo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub disposal_id: i64,
    pub status: DisposalStatus,
    pub processed_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_date_wire_shape() {
        let pickup: Pickup = serde_json::from_str(
            r#"{"id":300,"disposalId":200,"scheduledFor":"2025-10-18","status":"SCHEDULED"}"#,
        )
        .unwrap();
        assert_eq!(pickup.scheduled_for, NaiveDate::from_ymd_opt(2025, 10, 18).unwrap());
        assert_eq!(pickup.status, PickupStatus::Scheduled);

        let json = serde_json::to_value(&pickup).unwrap();
        assert_eq!(json["scheduledFor"], "2025-10-18");
    }

    #[test]
    fn test_scan_result_wire_shape() {
        let result: ScanResult = serde_json::from_str(
            r#"{"disposalId":201,"status":"PICKED_UP","processedAt":"2025-10-18T16:54:30"}"#,
        )
        .unwrap();
        assert_eq!(result.disposal_id, 201);
        assert_eq!(result.status, DisposalStatus::PickedUp);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["processedAt"], "2025-10-18T16:54:30");
        assert_eq!(json["status"], "PICKED_UP");
    }
}
