//! Unified error codes for the booking stack
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Availability errors
//! - 2xxx: Booking flow errors
//! - 3xxx: Payment errors
//! - 4xxx: Vehicle errors
//! - 9xxx: System and upstream errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so a host UI can map them
/// to localized messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Availability ====================
    /// Start date is after end date
    InvalidDateRange = 1001,
    /// Day cannot be picked (past or booked)
    DateNotSelectable = 1002,
    /// Range overlaps a blocking reservation
    RangeUnavailable = 1003,
    /// Reservation data could not be loaded
    ReservationsUnavailable = 1004,

    // ==================== 2xxx: Booking flow ====================
    /// Both rental dates must be selected
    DatesRequired = 2001,
    /// Customer name and email are required
    ContactDetailsRequired = 2002,
    /// Transition not allowed from the current step
    StepNotAllowed = 2003,
    /// Booking already confirmed
    BookingAlreadyConfirmed = 2004,

    // ==================== 3xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 3001,
    /// Payment declined by the provider
    PaymentDeclined = 3002,
    /// Invalid payment method
    PaymentInvalidMethod = 3003,
    /// A payment is already being processed
    PaymentInProgress = 3004,
    /// Payment provider unreachable
    PaymentGatewayUnavailable = 3005,
    /// Card details are incomplete or malformed
    CardDetailsInvalid = 3006,

    // ==================== 4xxx: Vehicle ====================
    /// Vehicle not found
    VehicleNotFound = 4001,
    /// Vehicle is not offered for rent
    VehicleUnavailable = 4002,
    /// Price per day is negative or malformed
    InvalidPrice = 4003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Upstream service returned an error
    UpstreamError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Timeout error
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Reservation could not be stored
    PersistenceFailed = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Availability
            ErrorCode::InvalidDateRange => "Start date must not be after end date",
            ErrorCode::DateNotSelectable => "Date cannot be selected",
            ErrorCode::RangeUnavailable => "Vehicle is not available for the selected dates",
            ErrorCode::ReservationsUnavailable => "Reservation data is unavailable",

            // Booking flow
            ErrorCode::DatesRequired => "Please select your rental dates",
            ErrorCode::ContactDetailsRequired => "Please fill in all fields",
            ErrorCode::StepNotAllowed => "Action is not allowed at this step",
            ErrorCode::BookingAlreadyConfirmed => "Booking is already confirmed",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::PaymentDeclined => "Payment was declined",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::PaymentInProgress => "Payment is already being processed",
            ErrorCode::PaymentGatewayUnavailable => "Payment provider is unavailable",
            ErrorCode::CardDetailsInvalid => "Card details are invalid",

            // Vehicle
            ErrorCode::VehicleNotFound => "Vehicle not found",
            ErrorCode::VehicleUnavailable => "Vehicle is not available for rent",
            ErrorCode::InvalidPrice => "Invalid price per day",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::UpstreamError => "Upstream service error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::PersistenceFailed => "Reservation could not be saved",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Availability
            1001 => Ok(ErrorCode::InvalidDateRange),
            1002 => Ok(ErrorCode::DateNotSelectable),
            1003 => Ok(ErrorCode::RangeUnavailable),
            1004 => Ok(ErrorCode::ReservationsUnavailable),

            // Booking flow
            2001 => Ok(ErrorCode::DatesRequired),
            2002 => Ok(ErrorCode::ContactDetailsRequired),
            2003 => Ok(ErrorCode::StepNotAllowed),
            2004 => Ok(ErrorCode::BookingAlreadyConfirmed),

            // Payment
            3001 => Ok(ErrorCode::PaymentFailed),
            3002 => Ok(ErrorCode::PaymentDeclined),
            3003 => Ok(ErrorCode::PaymentInvalidMethod),
            3004 => Ok(ErrorCode::PaymentInProgress),
            3005 => Ok(ErrorCode::PaymentGatewayUnavailable),
            3006 => Ok(ErrorCode::CardDetailsInvalid),

            // Vehicle
            4001 => Ok(ErrorCode::VehicleNotFound),
            4002 => Ok(ErrorCode::VehicleUnavailable),
            4003 => Ok(ErrorCode::InvalidPrice),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::UpstreamError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::PersistenceFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
