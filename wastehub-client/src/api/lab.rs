use http::Method;
use wastehub_core::{Lab, RegisterLab, UpdateLab};

use crate::client::{ApiClient, NO_BODY};
use crate::error::ApiError;
use crate::transport::{HttpTransport, Transport};

/// Labs within the caller's facility.
#[derive(Clone, Debug)]
pub struct LabApi<T = HttpTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> LabApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Lab>, ApiError> {
        self.client.send(Method::GET, "/labs", NO_BODY, None).await
    }

    pub async fn register(&self, request: &RegisterLab) -> Result<Lab, ApiError> {
        self.client
            .send(Method::POST, "/labs/register", Some(request), None)
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Lab, ApiError> {
        self.client
            .send(Method::GET, &format!("/labs/{}", id), NO_BODY, None)
            .await
    }

    /// Applies the set fields of `update`; unset fields stay as they are.
    pub async fn update(&self, id: i64, update: &UpdateLab) -> Result<Lab, ApiError> {
        self.client
            .send(Method::PATCH, &format!("/labs/{}", id), Some(update), None)
            .await
    }
}
