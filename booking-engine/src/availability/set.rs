//! Versioned reservation set

use shared::{Reservation, VehicleId};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Versions are unique across all sets, so caches can be shared
fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// Reservations known for one or more vehicles, with a version that changes
/// on every modification
///
/// The default (empty) set has version `0`.
///
/// An empty set is the explicit "no bookings" signal. Fetch failures never
/// produce one.
#[derive(Debug, Clone, Default)]
pub struct ReservationSet {
    version: u64,
    items: Vec<Reservation>,
}

impl ReservationSet {
    pub fn new(items: Vec<Reservation>) -> Self {
        Self {
            version: next_version(),
            items,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn items(&self) -> &[Reservation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reservations for one vehicle
    pub fn for_vehicle<'a>(
        &'a self,
        vehicle_id: &'a VehicleId,
    ) -> impl Iterator<Item = &'a Reservation> + 'a {
        self.items.iter().filter(move |r| &r.vehicle_id == vehicle_id)
    }

    /// Replace all reservations
    pub fn replace(&mut self, items: Vec<Reservation>) {
        self.items = items;
        self.version = next_version();
    }

    pub fn push(&mut self, reservation: Reservation) {
        self.items.push(reservation);
        self.version = next_version();
    }
}

impl From<Vec<Reservation>> for ReservationSet {
    fn from(items: Vec<Reservation>) -> Self {
        Self::new(items)
    }
}
