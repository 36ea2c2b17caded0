use http::Method;
use wastehub_core::{Facility, RegisterFacility};

use crate::client::{ApiClient, NO_BODY};
use crate::error::ApiError;
use crate::transport::{HttpTransport, Transport};

/// Facilities: the sites that own labs and raise pickup requests.
#[derive(Clone, Debug)]
pub struct FacilityApi<T = HttpTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> FacilityApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Registers a facility and attaches the caller's account to it.
    pub async fn register(&self, request: &RegisterFacility) -> Result<Facility, ApiError> {
        self.client
            .send(Method::POST, "/facilities/register", Some(request), None)
            .await
    }

    pub async fn list(&self) -> Result<Vec<Facility>, ApiError> {
        self.client
            .send(Method::GET, "/facilities", NO_BODY, None)
            .await
    }
}
