use std::fmt;
use std::sync::Arc;

use crate::client::ApiClient;
use crate::credentials::{CredentialStore, NoCredentials};
use crate::transport::HttpTransport;

/// Error when assembling an [`ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("base URL must not be empty")]
    EmptyBaseUrl,
    #[error("failed to create HTTP transport: {0}")]
    Transport(String),
}

/// Builder for an [`ApiClient`] backed by [`HttpTransport`].
///
/// Clients over other transports skip the builder and go through
/// [`ApiClient::with_transport`].
///
/// # Example
///
/// ```ignore
/// use wastehub_client::{ApiClient, HttpTransport, MemoryCredentials};
/// use std::sync::Arc;
///
/// let client = ApiClient::builder("https://api.wastehub.dev")
///     .transport(HttpTransport::builder().pool_max_idle_per_host(8).build()?)
///     .credentials(Arc::new(MemoryCredentials::new()))
///     .build()?;
/// ```
pub struct ClientBuilder {
    base_url: String,
    transport: Option<HttpTransport>,
    credentials: Option<Arc<dyn CredentialStore>>,
}

impl ClientBuilder {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            transport: None,
            credentials: None,
        }
    }

    /// Pre-built transport, for custom pool or TLS settings.
    pub fn transport(mut self, transport: HttpTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Credential store the client consults for bearer tokens.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Builds the client. The base URL is normalized by dropping any
    /// trailing slash.
    pub fn build(self) -> Result<ApiClient<HttpTransport>, BuildError> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(BuildError::EmptyBaseUrl);
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => HttpTransport::new().map_err(|e| BuildError::Transport(e.to_string()))?,
        };
        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(NoCredentials));

        Ok(ApiClient::new(base_url, transport, credentials))
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("has_transport", &self.transport.is_some())
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}
