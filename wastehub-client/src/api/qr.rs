use bytes::Bytes;
use http::Method;
use wastehub_core::{CreateQr, QrCode};

use crate::client::{ApiClient, NO_BODY};
use crate::error::ApiError;
use crate::transport::{HttpTransport, Transport};

/// QR codes minted for disposals.
#[derive(Clone, Debug)]
pub struct QrApi<T = HttpTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> QrApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn create(&self, disposal_id: i64) -> Result<QrCode, ApiError> {
        let request = CreateQr { disposal_id };
        self.client
            .send(Method::POST, "/qr", Some(&request), None)
            .await
    }

    /// The code rendered as a PNG.
    pub async fn image(&self, id: i64) -> Result<Bytes, ApiError> {
        self.client
            .send_bytes(Method::GET, &format!("/qr/{}/image", id), NO_BODY, None)
            .await
    }
}
