//! Typed async client for the WasteHub API.
//!
//! Every call runs one pipeline: build the address, encode the body, attach
//! the bearer credential, run the exchange, check the status, decode. What
//! differs per endpoint is only the response shape, so the client exposes
//! one entry point per shape:
//!
//! - [`ApiClient::send`]: JSON in, JSON out
//! - [`ApiClient::send_empty`]: JSON in, nothing out
//! - [`ApiClient::send_bytes`]: raw bytes out (QR images)
//! - [`ApiClient::send_multipart`]: one-file form upload, JSON out
//!
//! The [`api`] services wrap these with the paths and types of each
//! resource.
//!
//! ## Backends
//!
//! The exchange itself goes through a [`Transport`]. [`HttpTransport`]
//! talks to a real backend over hyper and rustls; [`FixtureTransport`] is
//! an in-memory stand-in with seeded data for demos and tests. Which one a
//! client uses is decided at construction and nowhere else.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wastehub_client::{ApiClient, AuthApi, MemoryCredentials, PickupApi};
//!
//! let client = ApiClient::builder("https://api.wastehub.dev")
//!     .credentials(Arc::new(MemoryCredentials::new()))
//!     .build()?;
//!
//! let auth = AuthApi::new(client.clone());
//! auth.login("a@b.com", "secret").await?;
//!
//! let pickups = PickupApi::new(client.clone());
//! for pickup in pickups.today().await? {
//!     println!("{} on {}", pickup.disposal_id, pickup.scheduled_for);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! The default configuration enables TLS with the ring provider and the
//! operating system's root certificates.
//!
//! ### TLS
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `tls` | Shorthand for `tls-ring` + `tls-native-roots` (default) | As below |
//! | `tls-ring` | ring as the rustls crypto provider | `rustls/ring` |
//! | `tls-aws-lc` | aws-lc-rs as the rustls crypto provider | `rustls/aws-lc-rs` |
//! | `tls-native-roots` | Trust the OS certificate store | `rustls-native-certs` |
//! | `tls-webpki-roots` | Trust the bundled webpki roots | `webpki-roots` |
//!
//! With no provider feature, a process-level default provider installed via
//! [`rustls::crypto::CryptoProvider::install_default`] is picked up instead.
//!
//! ### Observability
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `tracing` | Span per API call | `tracing` |
//!
//! When enabled, each call creates an `api.call` span with:
//! - `http.method`: Request method (e.g., "POST")
//! - `http.path`: Endpoint path (e.g., "/auth/login")
//! - `otel.kind`: "client"

mod builder;
mod client;
mod credentials;
mod error;
mod multipart;
mod retry;

pub mod api;
pub mod transport;

// Core client surface
pub use builder::{BuildError, ClientBuilder};
pub use client::{ApiClient, NO_BODY};
pub use error::ApiError;

// Credentials
pub use credentials::{CredentialStore, MemoryCredentials, NoCredentials};

// Uploads
pub use multipart::FilePart;

// Session helpers
pub use retry::retry_once_on_unauthorized;

// Re-export transport types at the top level for convenience
pub use transport::{
    FixtureTransport, HttpTransport, HttpTransportBuilder, TlsClientConfig, Transport,
};

// Per-resource services
pub use api::{
    AuthApi, DisposalApi, FacilityApi, LabApi, PickupApi, PickupRequestApi, QrApi, UserApi,
};

// Re-export core types that users need
pub use wastehub_core::{
    CreatePickupRequest, CreateQr, Disposal, DisposalStatus, Facility, FacilityKind, Lab,
    LoginRequest, Pickup, PickupRequest, PickupRequestStatus, PickupStatus, QrCode,
    RefreshRequest, RegisterDisposal, RegisterFacility, RegisterLab, ScanRequest, ScanResult,
    SendCodeRequest, SignupRequest, TokenPair, UpdateDisposal, UpdateLab, UpdatePickupRequest,
    UserProfile, VerifyCodeRequest,
};

// Re-export the wire-level types callers handle directly
pub use bytes::Bytes;
pub use http::Method;
