use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderValue, Method, Request, Response, StatusCode, Uri, header};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "tracing")]
use tracing::info_span;

use crate::builder::ClientBuilder;
use crate::credentials::{CredentialStore, NoCredentials};
use crate::error::ApiError;
use crate::multipart::{self, FilePart};
use crate::transport::{HttpTransport, Transport};

/// Body argument for calls that send nothing.
pub const NO_BODY: Option<&()> = None;

const CONTENT_TYPE_JSON: &str = "application/json";
const ACCEPT_JSON: &str = "application/json";
const ACCEPT_PNG: &str = "image/png";

/// Typed client for the WasteHub API.
///
/// One client per backend; the API services in [`api`](crate::api) wrap it
/// per resource. Every request runs the same pipeline: build the address,
/// encode the body, attach the bearer credential, run the exchange through
/// the transport, check the status, decode.
///
/// Clones are cheap and share the transport and credential store.
///
/// # Example
///
/// ```ignore
/// use wastehub_client::{ApiClient, MemoryCredentials, Method};
/// use std::sync::Arc;
///
/// let client = ApiClient::builder("https://api.wastehub.dev")
///     .credentials(Arc::new(MemoryCredentials::new()))
///     .build()?;
///
/// let labs: Vec<wastehub_core::Lab> = client
///     .send(Method::GET, "/labs", wastehub_client::NO_BODY, None)
///     .await?;
/// ```
#[derive(Clone)]
pub struct ApiClient<T = HttpTransport> {
    base_url: String,
    transport: T,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient<HttpTransport> {
    /// Builder for a client backed by [`HttpTransport`].
    pub fn builder<S: Into<String>>(base_url: S) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Client over a caller-supplied transport, most often a
    /// [`FixtureTransport`](crate::transport::FixtureTransport).
    ///
    /// Credentials start as [`NoCredentials`]; chain
    /// [`with_credentials`](Self::with_credentials) to change that.
    pub fn with_transport<S: Into<String>>(base_url: S, transport: T) -> Self {
        Self::new(base_url.into(), transport, Arc::new(NoCredentials))
    }

    /// Swaps the credential store.
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = credentials;
        self
    }

    pub(crate) fn new(
        base_url: String,
        transport: T,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            credentials,
        }
    }

    /// Base URL this client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credential store consulted for calls without an explicit token.
    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    /// Sends a request and decodes the JSON answer into `Res`.
    ///
    /// `body` is serialized as JSON when present. `token` overrides the
    /// credential store for this one call. An empty success body is an
    /// [`ApiError::NoData`]; use [`send_empty`](Self::send_empty) for
    /// endpoints that answer with nothing.
    pub async fn send<Req, Res>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Req>,
        token: Option<&str>,
    ) -> Result<Res, ApiError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let payload = encode_json(body)?;
        let response = self
            .dispatch(method, endpoint, CONTENT_TYPE_JSON, ACCEPT_JSON, payload, token)
            .await?;
        let bytes = response.into_body();
        if bytes.is_empty() {
            return Err(ApiError::NoData);
        }
        decode_json(&bytes)
    }

    /// Sends a request and discards the response body.
    pub async fn send_empty<Req>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Req>,
        token: Option<&str>,
    ) -> Result<(), ApiError>
    where
        Req: Serialize + ?Sized,
    {
        let payload = encode_json(body)?;
        self.dispatch(method, endpoint, CONTENT_TYPE_JSON, ACCEPT_JSON, payload, token)
            .await?;
        Ok(())
    }

    /// Fetches raw bytes, advertising `image/png` to the server.
    pub async fn send_bytes<Req>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Req>,
        token: Option<&str>,
    ) -> Result<Bytes, ApiError>
    where
        Req: Serialize + ?Sized,
    {
        let payload = encode_json(body)?;
        let response = self
            .dispatch(method, endpoint, CONTENT_TYPE_JSON, ACCEPT_PNG, payload, token)
            .await?;
        let bytes = response.into_body();
        if bytes.is_empty() {
            return Err(ApiError::NoData);
        }
        Ok(bytes)
    }

    /// Uploads one file as `multipart/form-data` and decodes the JSON
    /// answer into `Res`.
    pub async fn send_multipart<Res>(
        &self,
        endpoint: &str,
        part: &FilePart,
        token: Option<&str>,
    ) -> Result<Res, ApiError>
    where
        Res: DeserializeOwned,
    {
        let boundary = multipart::random_boundary();
        let payload = multipart::encode_form(part, &boundary);
        let content_type = format!("multipart/form-data; boundary={}", boundary);
        let response = self
            .dispatch(
                Method::POST,
                endpoint,
                &content_type,
                ACCEPT_JSON,
                Some(payload),
                token,
            )
            .await?;
        let bytes = response.into_body();
        if bytes.is_empty() {
            return Err(ApiError::NoData);
        }
        decode_json(&bytes)
    }

    async fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        content_type: &str,
        accept: &str,
        body: Option<Bytes>,
        token: Option<&str>,
    ) -> Result<Response<Bytes>, ApiError> {
        #[cfg(feature = "tracing")]
        let _span = info_span!(
            "api.call",
            http.method = %method,
            http.path = %endpoint,
            otel.kind = "client",
        )
        .entered();

        // 1. Build the URL (strip the leading slash to avoid double slashes)
        let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
        let url = format!("{}/{}", self.base_url, endpoint);
        let uri: Uri = url
            .parse()
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;

        // 2. Resolve the bearer credential (explicit token wins over the store)
        let bearer = match token {
            Some(token) => Some(token.to_string()),
            None => self.credentials.access_token(),
        };

        // 3. Assemble the request
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::ACCEPT, accept);
        if let Some(bearer) = bearer {
            let value = HeaderValue::from_str(&format!("Bearer {}", bearer))
                .map_err(|e| ApiError::Encode(format!("invalid bearer token: {}", e)))?;
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = builder
            .body(body.unwrap_or_default())
            .map_err(|e| ApiError::InvalidUrl(format!("failed to build request: {}", e)))?;

        // 4. Run the exchange
        let response = self.transport.request(request).await?;

        // 5. Map the status
        check_status(response.status())?;
        Ok(response)
    }
}

impl<T: fmt::Debug> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

fn check_status(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::UNAUTHORIZED {
        Err(ApiError::Unauthorized)
    } else {
        Err(ApiError::Status(status))
    }
}

fn encode_json<Req: Serialize + ?Sized>(body: Option<&Req>) -> Result<Option<Bytes>, ApiError> {
    match body {
        Some(value) => serde_json::to_vec(value)
            .map(Bytes::from)
            .map(Some)
            .map_err(|e| ApiError::Encode(format!("JSON encoding failed: {}", e))),
        None => Ok(None),
    }
}

fn decode_json<Res: DeserializeOwned>(bytes: &Bytes) -> Result<Res, ApiError> {
    serde_json::from_slice(bytes)
        .map_err(|e| ApiError::Decode(format!("JSON decoding failed: {}", e)))
}
