use http::Method;
use wastehub_core::{Pickup, ScanRequest, ScanResult};

use crate::client::{ApiClient, NO_BODY};
use crate::error::ApiError;
use crate::multipart::FilePart;
use crate::transport::{HttpTransport, Transport};

/// Scheduled pickups and the scan endpoint that closes them out.
#[derive(Clone, Debug)]
pub struct PickupApi<T = HttpTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> PickupApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Marks a disposal as collected, by id.
    pub async fn scan(&self, disposal_id: i64) -> Result<ScanResult, ApiError> {
        let request = ScanRequest { disposal_id };
        self.client
            .send(Method::POST, "/pickups/scan", Some(&request), None)
            .await
    }

    /// Submits a label photo; the backend works out which disposal it is.
    pub async fn scan_image(&self, image: FilePart) -> Result<ScanResult, ApiError> {
        self.client
            .send_multipart("/pickups/scan", &image, None)
            .await
    }

    /// Pickups scheduled for today.
    pub async fn today(&self) -> Result<Vec<Pickup>, ApiError> {
        self.client
            .send(Method::GET, "/pickups/today", NO_BODY, None)
            .await
    }

    /// Pickups scheduled for tomorrow.
    pub async fn tomorrow(&self) -> Result<Vec<Pickup>, ApiError> {
        self.client
            .send(Method::GET, "/pickups/tomorrow", NO_BODY, None)
            .await
    }

    pub async fn list(&self) -> Result<Vec<Pickup>, ApiError> {
        self.client
            .send(Method::GET, "/pickups", NO_BODY, None)
            .await
    }
}
