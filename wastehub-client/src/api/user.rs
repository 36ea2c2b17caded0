use http::Method;
use wastehub_core::UserProfile;

use crate::client::{ApiClient, NO_BODY};
use crate::error::ApiError;
use crate::transport::{HttpTransport, Transport};

/// The authenticated user.
#[derive(Clone, Debug)]
pub struct UserApi<T = HttpTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> UserApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Profile of the user behind the stored credential.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        self.client
            .send(Method::GET, "/user/me", NO_BODY, None)
            .await
    }
}
