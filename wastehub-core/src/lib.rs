//! Wire types for the WasteHub API.
//!
//! Plain data only: `serde` derives over the JSON shapes the backend speaks,
//! with camelCase field names and SCREAMING_SNAKE_CASE enum variants. No I/O
//! lives in this crate.
//!
//! ## Modules
//!
//! - `auth`: login, signup, verification and token types
//! - `user`: the authenticated user's profile
//! - `facility`: facilities and facility registration
//! - `lab`: labs and their update payloads
//! - `disposal`: registered waste and its lifecycle
//! - `pickup`: scheduled pickups and scan results
//! - `pickup_request`: collection requests raised by facilities
//! - `qr`: QR codes minted for disposals

mod auth;
mod disposal;
mod facility;
mod lab;
mod pickup;
mod pickup_request;
mod qr;
mod user;

pub use auth::*;
pub use disposal::*;
pub use facility::*;
pub use lab::*;
pub use pickup::*;
pub use pickup_request::*;
pub use qr::*;
pub use user::*;
