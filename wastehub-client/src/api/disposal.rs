use http::Method;
use wastehub_core::{Disposal, RegisterDisposal, UpdateDisposal};

use crate::client::{ApiClient, NO_BODY};
use crate::error::ApiError;
use crate::transport::{HttpTransport, Transport};

/// Registered waste items.
#[derive(Clone, Debug)]
pub struct DisposalApi<T = HttpTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> DisposalApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Disposal>, ApiError> {
        self.client
            .send(Method::GET, "/disposals", NO_BODY, None)
            .await
    }

    /// Registers a new item; it starts in `REGISTERED` state.
    pub async fn register(&self, request: &RegisterDisposal) -> Result<Disposal, ApiError> {
        self.client
            .send(Method::POST, "/disposals", Some(request), None)
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Disposal, ApiError> {
        self.client
            .send(Method::GET, &format!("/disposals/{}", id), NO_BODY, None)
            .await
    }

    pub async fn update(&self, id: i64, update: &UpdateDisposal) -> Result<Disposal, ApiError> {
        self.client
            .send(
                Method::PATCH,
                &format!("/disposals/{}", id),
                Some(update),
                None,
            )
            .await
    }
}
