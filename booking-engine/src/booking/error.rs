use chrono::NaiveDate;
use shared::{AppError, ErrorCode};
use thiserror::Error;

use super::card::CardError;
use super::step::BookingStep;
use super::traits::{PaymentError, SourceError, StoreError};

/// Booking flow errors
///
/// Every variant leaves the flow on its current step; none is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Please select your rental dates")]
    DatesRequired,

    #[error("Please fill in all fields")]
    ContactDetailsRequired,

    #[error("Action '{action}' is not allowed on step {step}")]
    StepNotAllowed {
        step: BookingStep,
        action: &'static str,
    },

    #[error("Booking is already confirmed")]
    AlreadyConfirmed,

    #[error("Selected dates are no longer available")]
    RangeUnavailable,

    #[error("Selected dates start on {start}, which is before today ({today})")]
    DatesInPast { start: NaiveDate, today: NaiveDate },

    #[error("Total price is out of range")]
    PriceOutOfRange,

    #[error("Payment is already being processed")]
    PaymentInProgress,

    #[error("Invalid card details: {0}")]
    CardDetailsInvalid(#[from] CardError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Payment succeeded but the booking could not be saved: {0}")]
    PersistenceFailed(StoreError),

    #[error("Could not load reservations: {0}")]
    ReservationsUnavailable(SourceError),

    #[error("Invalid booking request: {0}")]
    InvalidRequest(String),
}

impl FlowError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DatesRequired => ErrorCode::DatesRequired,
            Self::ContactDetailsRequired => ErrorCode::ContactDetailsRequired,
            Self::StepNotAllowed { .. } => ErrorCode::StepNotAllowed,
            Self::AlreadyConfirmed => ErrorCode::BookingAlreadyConfirmed,
            Self::RangeUnavailable => ErrorCode::RangeUnavailable,
            Self::DatesInPast { .. } => ErrorCode::DateNotSelectable,
            Self::PriceOutOfRange => ErrorCode::InvalidPrice,
            Self::PaymentInProgress => ErrorCode::PaymentInProgress,
            Self::CardDetailsInvalid(_) => ErrorCode::CardDetailsInvalid,
            Self::Payment(PaymentError::Declined(_)) => ErrorCode::PaymentDeclined,
            Self::Payment(PaymentError::Unavailable(_)) => ErrorCode::PaymentGatewayUnavailable,
            Self::PersistenceFailed(StoreError::Conflict(_)) => ErrorCode::RangeUnavailable,
            Self::PersistenceFailed(_) => ErrorCode::PersistenceFailed,
            Self::ReservationsUnavailable(SourceError::VehicleNotFound(_)) => {
                ErrorCode::VehicleNotFound
            }
            Self::ReservationsUnavailable(_) => ErrorCode::ReservationsUnavailable,
            Self::InvalidRequest(_) => ErrorCode::ValidationFailed,
        }
    }

    /// Whether the same action can be tried again without changing input
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Payment(_) | Self::PersistenceFailed(_) | Self::ReservationsUnavailable(_)
        )
    }
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        let code = err.code();
        let app = AppError::with_message(code, err.to_string());
        match err {
            FlowError::StepNotAllowed { step, action } => app
                .with_detail("step", step.as_str())
                .with_detail("action", action),
            FlowError::DatesInPast { start, today } => app
                .with_detail("start", start.to_string())
                .with_detail("today", today.to_string()),
            _ => app,
        }
    }
}
