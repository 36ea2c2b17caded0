use serde::{Deserialize, Serialize};

/// Payload for `POST /qr`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQr {
    pub disposal_id: i64,
}

/// Handle for a minted QR code. The PNG itself comes from
/// `GET /qr/{id}/image`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub id: i64,
    pub disposal_id: i64,
}
