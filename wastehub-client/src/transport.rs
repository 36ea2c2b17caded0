//! Pluggable request transports.
//!
//! The client core only knows how to build and interpret requests; the
//! actual exchange goes through a [`Transport`]. Two implementations ship
//! with the crate:
//!
//! - [`HttpTransport`]: pooled hyper client with rustls, for real backends
//! - [`FixtureTransport`]: in-memory backend with seeded data, for demos
//!   and tests without a network

use bytes::Bytes;
use http::{Request, Response};

use crate::error::ApiError;

mod connector;
mod fixture;
mod http_transport;

pub use fixture::FixtureTransport;
pub use http_transport::{HttpTransport, HttpTransportBuilder};

// Re-export the rustls config type used by HttpTransportBuilder::tls_config
pub use rustls::ClientConfig as TlsClientConfig;

/// One full HTTP exchange: complete request in, complete response out.
///
/// Bodies are plain [`Bytes`] on both sides; transports that stream
/// internally collect before returning. Implementations report failures as
/// [`ApiError::Transport`].
pub trait Transport: Send + Sync {
    fn request(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>, ApiError>> + Send;
}
