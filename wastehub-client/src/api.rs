//! Per-resource services over [`ApiClient`](crate::ApiClient).
//!
//! Each service owns a client clone and knows the paths and shapes of one
//! resource. Construction is cheap; make one wherever it is convenient.

pub mod auth;
pub mod disposal;
pub mod facility;
pub mod lab;
pub mod pickup;
pub mod pickup_request;
pub mod qr;
pub mod user;

pub use auth::AuthApi;
pub use disposal::DisposalApi;
pub use facility::FacilityApi;
pub use lab::LabApi;
pub use pickup::PickupApi;
pub use pickup_request::PickupRequestApi;
pub use qr::QrApi;
pub use user::UserApi;
