//! Vehicle availability search
//!
//! Filtering for the vehicle listing: which vehicles can be booked, narrowed
//! by optional listing filters. Without a date range only the fleet
//! `available` flag is consulted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{Reservation, Vehicle};

use crate::availability::{BlockingPolicy, is_range_available};
use crate::interval::BookingInterval;

/// Listing filters; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFilter {
    pub agency_id: Option<String>,
    pub vehicle_type: Option<String>,
    /// Case-insensitive text matched against name (brand and model) and type
    pub query: Option<String>,
    /// Minimum passenger seats
    pub min_seats: Option<u8>,
    pub max_price_per_day: Option<Decimal>,
}

impl VehicleFilter {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if let Some(agency_id) = &self.agency_id
            && &vehicle.agency_id != agency_id
        {
            return false;
        }
        if let Some(vehicle_type) = &self.vehicle_type
            && !vehicle.vehicle_type.eq_ignore_ascii_case(vehicle_type)
        {
            return false;
        }
        if let Some(query) = &self.query
            && !matches_text(vehicle, query)
        {
            return false;
        }
        if let Some(min) = self.min_seats
            && vehicle.seats < min
        {
            return false;
        }
        if let Some(max) = self.max_price_per_day
            && vehicle.price_per_day > max
        {
            return false;
        }
        true
    }
}

fn matches_text(vehicle: &Vehicle, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    vehicle.name.to_lowercase().contains(&needle)
        || vehicle.vehicle_type.to_lowercase().contains(&needle)
}

/// Vehicles flagged available that have no blocking reservation overlapping
/// `candidate`, or every available vehicle when no range is given
pub fn available_vehicles<'a>(
    vehicles: &'a [Vehicle],
    candidate: Option<&BookingInterval>,
    reservations: &[Reservation],
    policy: &BlockingPolicy,
) -> Vec<&'a Vehicle> {
    vehicles
        .iter()
        .filter(|v| v.available)
        .filter(|v| {
            candidate.is_none_or(|range| is_range_available(&v.id, range, reservations, policy))
        })
        .collect()
}

/// [`available_vehicles`] narrowed by `filter`, cheapest first
pub fn search<'a>(
    vehicles: &'a [Vehicle],
    candidate: Option<&BookingInterval>,
    reservations: &[Reservation],
    policy: &BlockingPolicy,
    filter: &VehicleFilter,
) -> Vec<&'a Vehicle> {
    let mut results: Vec<&Vehicle> = available_vehicles(vehicles, candidate, reservations, policy)
        .into_iter()
        .filter(|v| filter.matches(v))
        .collect();
    results.sort_by(|a, b| a.price_per_day.cmp(&b.price_per_day));
    tracing::debug!(
        candidates = vehicles.len(),
        matches = results.len(),
        start = ?candidate.map(BookingInterval::start),
        end = ?candidate.map(BookingInterval::end),
        "Vehicle search"
    );
    results
}
