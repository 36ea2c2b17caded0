use http::Method;
use wastehub_core::{
    LoginRequest, RefreshRequest, SendCodeRequest, SignupRequest, TokenPair, VerifyCodeRequest,
};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{HttpTransport, Transport};

/// Login, signup and session management.
///
/// Successful login and refresh write the issued pair into the client's
/// credential store, so later calls ride on it automatically.
#[derive(Clone, Debug)]
pub struct AuthApi<T = HttpTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> AuthApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a token pair and stores it.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let pair: TokenPair = self
            .client
            .send(Method::POST, "/auth/login", Some(&request), None)
            .await?;
        self.client.credentials().store(&pair);
        Ok(pair)
    }

    /// Registers a new account. The backend answers with an empty body.
    pub async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        self.client
            .send_empty(Method::POST, "/auth/signup", Some(request), None)
            .await
    }

    /// Asks for a verification code to be mailed.
    pub async fn send_code(&self, email: &str) -> Result<(), ApiError> {
        let request = SendCodeRequest {
            email: email.to_string(),
        };
        self.client
            .send_empty(Method::POST, "/auth/send-code", Some(&request), None)
            .await
    }

    /// Hands a mailed code back for checking.
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<(), ApiError> {
        let request = VerifyCodeRequest {
            email: email.to_string(),
            code: code.to_string(),
        };
        self.client
            .send_empty(Method::POST, "/auth/verify-code", Some(&request), None)
            .await
    }

    /// Trades the held refresh token for a fresh pair and stores it.
    ///
    /// Fails with [`ApiError::Unauthorized`] when no refresh token is held
    /// or the server rejects the one presented.
    pub async fn refresh(&self) -> Result<TokenPair, ApiError> {
        let Some(refresh_token) = self.client.credentials().refresh_token() else {
            return Err(ApiError::Unauthorized);
        };
        let request = RefreshRequest { refresh_token };
        let pair: TokenPair = self
            .client
            .send(Method::POST, "/auth/refresh", Some(&request), None)
            .await?;
        self.client.credentials().store(&pair);
        Ok(pair)
    }

    /// Ends the session locally by wiping the credential store.
    pub fn logout(&self) {
        self.client.credentials().clear();
    }
}
