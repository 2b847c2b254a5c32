//! Vehicle Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque vehicle identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for VehicleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for VehicleId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// Gearbox type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    #[default]
    Automatic,
    Manual,
}

/// Vehicle listed by an agency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub agency_id: String,
    /// Display name ("Tesla Model 3")
    pub name: String,
    /// Body type ("SUV", "Sedan", ...)
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub price_per_day: Decimal,
    pub seats: u8,
    #[serde(default)]
    pub transmission: Transmission,
    pub fuel_type: String,
    /// Agency-level switch; false hides the vehicle regardless of bookings
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// What a booking flow needs to know about the vehicle being booked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingTarget {
    pub vehicle_id: VehicleId,
    pub vehicle_name: String,
    pub price_per_day: Decimal,
}

impl BookingTarget {
    pub fn new(
        vehicle_id: impl Into<VehicleId>,
        vehicle_name: impl Into<String>,
        price_per_day: Decimal,
    ) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            vehicle_name: vehicle_name.into(),
            price_per_day,
        }
    }
}

impl From<&Vehicle> for BookingTarget {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            vehicle_id: vehicle.id.clone(),
            vehicle_name: vehicle.name.clone(),
            price_per_day: vehicle.price_per_day,
        }
    }
}
