//! Reservation Model
//!
//! Reservations are created by a prior booking and are read-only to the
//! booking engine. Dates are calendar days; time-of-day is never stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use super::de;
use super::vehicle::VehicleId;
use crate::error::{AppError, ErrorCode};

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reservation status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Existing reservation for a vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(
        default,
        deserialize_with = "de::opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub vehicle_id: VehicleId,
    #[serde(deserialize_with = "de::calendar_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "de::calendar_date")]
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
}

impl Reservation {
    /// Create a reservation, rejecting `start_date > end_date`
    pub fn new(
        vehicle_id: impl Into<VehicleId>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: ReservationStatus,
    ) -> Result<Self, AppError> {
        if start_date > end_date {
            return Err(AppError::new(ErrorCode::InvalidDateRange)
                .with_detail("start_date", start_date.to_string())
                .with_detail("end_date", end_date.to_string()));
        }
        Ok(Self {
            id: None,
            vehicle_id: vehicle_id.into(),
            start_date,
            end_date,
            status,
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Number of calendar days occupied, both ends included
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Create-reservation request sent when a booking is confirmed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_date_order"))]
pub struct CreateReservationRequest {
    pub vehicle_id: VehicleId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(email, length(max = 254))]
    pub customer_email: String,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
}

fn validate_date_order(request: &CreateReservationRequest) -> Result<(), ValidationError> {
    if request.start_date > request.end_date {
        return Err(ValidationError::new("date_order"));
    }
    Ok(())
}

impl CreateReservationRequest {
    /// Reservation this request will create once stored
    pub fn to_reservation(&self) -> Reservation {
        Reservation {
            id: None,
            vehicle_id: self.vehicle_id.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
        }
    }
}
