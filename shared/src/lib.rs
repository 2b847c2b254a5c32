//! Shared types for the car rental booking stack
//!
//! Common types used by the booking engine and the REST client:
//! vehicle and reservation models, session context, and the unified
//! error system.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    BookingTarget, CreateReservationRequest, CurrentUser, Reservation, ReservationStatus,
    SessionContext, Transmission, Vehicle, VehicleId,
};
