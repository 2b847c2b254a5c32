//! Rental Client - REST adapter for the marketplace backend
//!
//! Implements the booking engine's collaborator traits
//! ([`booking_engine::booking::ReservationSource`],
//! [`booking_engine::booking::VehicleCatalog`] and
//! [`booking_engine::booking::BookingStore`]) against the PostgREST-style
//! `/rest/v1` API.

pub mod config;
pub mod error;
pub mod http;
pub mod reservations;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::RestClient;
pub use reservations::RestBookingBackend;
