use http::Method;
use wastehub_core::{CreatePickupRequest, PickupRequest, UpdatePickupRequest};

use crate::client::{ApiClient, NO_BODY};
use crate::error::ApiError;
use crate::transport::{HttpTransport, Transport};

/// Collection requests raised by a facility.
#[derive(Clone, Debug)]
pub struct PickupRequestApi<T = HttpTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> PickupRequestApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<PickupRequest>, ApiError> {
        self.client
            .send(Method::GET, "/pickup-requests", NO_BODY, None)
            .await
    }

    /// Raises a request; listed disposals move to `REQUESTED`.
    pub async fn create(&self, request: &CreatePickupRequest) -> Result<PickupRequest, ApiError> {
        self.client
            .send(Method::POST, "/pickup-requests", Some(request), None)
            .await
    }

    pub async fn get(&self, id: i64) -> Result<PickupRequest, ApiError> {
        self.client
            .send(
                Method::GET,
                &format!("/pickup-requests/{}", id),
                NO_BODY,
                None,
            )
            .await
    }

    pub async fn update(
        &self,
        id: i64,
        update: &UpdatePickupRequest,
    ) -> Result<PickupRequest, ApiError> {
        self.client
            .send(
                Method::PATCH,
                &format!("/pickup-requests/{}", id),
                Some(update),
                None,
            )
            .await
    }

    /// Cancels the request. The backend answers with an empty body.
    pub async fn cancel(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .send_empty(
                Method::DELETE,
                &format!("/pickup-requests/{}", id),
                NO_BODY,
                None,
            )
            .await
    }
}
