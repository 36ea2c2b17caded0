use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use http::{Request, Response};
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use rustls::ClientConfig;

use crate::error::ApiError;

use super::Transport;
use super::connector::{build_https_connector, danger_accept_invalid_certs_config};

type PooledClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Real backend transport: a pooled hyper client over rustls.
///
/// Cheap to clone; clones share the connection pool. Speaks `https` and
/// plain `http`, with HTTP/2 negotiated over ALPN where the server offers
/// it.
#[derive(Clone)]
pub struct HttpTransport {
    client: PooledClient,
}

impl HttpTransport {
    /// Builder with pool and TLS knobs.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Transport with default pooling and TLS from the enabled features.
    pub fn new() -> Result<Self, ApiError> {
        Self::builder().build()
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl Transport for HttpTransport {
    async fn request(&self, request: Request<Bytes>) -> Result<Response<Bytes>, ApiError> {
        let (parts, body) = request.into_parts();
        let request = Request::from_parts(parts, Full::new(body));

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| ApiError::Transport(format!("request failed: {}", e)))?;

        let (parts, body) = response.into_parts();
        let bytes = body
            .collect()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to read response body: {}", e)))?
            .to_bytes();
        Ok(Response::from_parts(parts, bytes))
    }
}

/// Configures and builds an [`HttpTransport`].
#[derive(Clone)]
pub struct HttpTransportBuilder {
    pool_idle_timeout: Option<Duration>,
    pool_max_idle_per_host: usize,
    tls_config: Option<ClientConfig>,
    danger_accept_invalid_certs: bool,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 32,
            tls_config: None,
            danger_accept_invalid_certs: false,
        }
    }
}

impl HttpTransportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// How long an idle pooled connection is kept around. `None` keeps
    /// connections indefinitely.
    pub fn pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Cap on idle connections kept per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Custom rustls config, replacing the one built from features.
    pub fn tls_config(mut self, config: ClientConfig) -> Self {
        self.tls_config = Some(config);
        self
    }

    /// Skip server certificate verification. Development servers with
    /// self-signed certificates only.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.danger_accept_invalid_certs = accept;
        self
    }

    /// Builds the transport.
    ///
    /// # Panics
    ///
    /// Panics when no TLS configuration can be assembled; see
    /// [`connector`](super::connector) for the feature rules.
    pub fn build(self) -> Result<HttpTransport, ApiError> {
        let tls_config = if self.danger_accept_invalid_certs {
            danger_accept_invalid_certs_config().or(self.tls_config)
        } else {
            self.tls_config
        };
        let connector = build_https_connector(tls_config);

        let mut builder = Client::builder(TokioExecutor::new());
        builder.pool_timer(TokioTimer::new());
        if let Some(timeout) = self.pool_idle_timeout {
            builder.pool_idle_timeout(timeout);
        }
        builder.pool_max_idle_per_host(self.pool_max_idle_per_host);

        let client = builder.build(connector);
        Ok(HttpTransport { client })
    }
}

impl fmt::Debug for HttpTransportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransportBuilder")
            .field("pool_idle_timeout", &self.pool_idle_timeout)
            .field("pool_max_idle_per_host", &self.pool_max_idle_per_host)
            .field("danger_accept_invalid_certs", &self.danger_accept_invalid_certs)
            .finish_non_exhaustive()
    }
}
