//! Collaborator traits
//!
//! The engine reaches the outside world only through these.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{BookingTarget, CreateReservationRequest, Reservation, VehicleId};
use thiserror::Error;

use super::payment::{PaymentReceipt, PaymentRequestMethod};

/// Reservation or vehicle lookup failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Reservation source unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed reservation data: {0}")]
    Malformed(String),
}

/// Booking persistence failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend refused the booking because it clashes with another one
    #[error("Booking conflict: {0}")]
    Conflict(String),

    #[error("Booking rejected: {0}")]
    Rejected(String),

    #[error("Booking store unavailable: {0}")]
    Unavailable(String),
}

/// Payment failure; both variants may be retried
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),

    #[error("Payment service unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the reservations of a vehicle
///
/// `Ok(vec![])` means the vehicle has no bookings. A fetch failure must be
/// an `Err`, never an empty list.
#[async_trait]
pub trait ReservationSource: Send + Sync {
    async fn reservations_for(&self, vehicle_id: &VehicleId) -> Result<Vec<Reservation>, SourceError>;
}

/// Supplies the name and daily rate of a vehicle
#[async_trait]
pub trait VehicleCatalog: Send + Sync {
    async fn booking_target(&self, vehicle_id: &VehicleId) -> Result<BookingTarget, SourceError>;
}

/// Persists confirmed bookings
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Store the reservation, returning it as stored (with its id)
    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<Reservation, StoreError>;
}

/// Charges the customer
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn submit_payment(
        &self,
        amount: Decimal,
        method: &PaymentRequestMethod,
    ) -> Result<PaymentReceipt, PaymentError>;
}
