//! In-memory collaborators
//!
//! Used by tests and by hosts running without a backend.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared::{BookingTarget, CreateReservationRequest, Reservation, VehicleId};
use std::collections::HashMap;

use super::traits::{
    BookingStore, ReservationSource, SourceError, StoreError, VehicleCatalog,
};
use crate::availability::{BlockingPolicy, is_range_available};
use crate::interval::BookingInterval;

/// Reservation source backed by a map
#[derive(Debug, Default)]
pub struct InMemoryReservationSource {
    reservations: RwLock<HashMap<VehicleId, Vec<Reservation>>>,
    failure: RwLock<Option<SourceError>>,
}

impl InMemoryReservationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reservations(reservations: impl IntoIterator<Item = Reservation>) -> Self {
        let source = Self::new();
        for reservation in reservations {
            source.insert(reservation);
        }
        source
    }

    pub fn insert(&self, reservation: Reservation) {
        self.reservations
            .write()
            .entry(reservation.vehicle_id.clone())
            .or_default()
            .push(reservation);
    }

    /// Make every lookup fail until cleared with `None`
    pub fn set_failure(&self, failure: Option<SourceError>) {
        *self.failure.write() = failure;
    }
}

#[async_trait]
impl ReservationSource for InMemoryReservationSource {
    async fn reservations_for(&self, vehicle_id: &VehicleId) -> Result<Vec<Reservation>, SourceError> {
        if let Some(err) = self.failure.read().clone() {
            return Err(err);
        }
        Ok(self
            .reservations
            .read()
            .get(vehicle_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Booking store keeping reservations in a vector
///
/// Rejects a booking with [`StoreError::Conflict`] when it overlaps a stored
/// one under the default blocking policy.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    stored: Mutex<Vec<Reservation>>,
    failures: Mutex<Vec<StoreError>>,
    next_id: Mutex<u64>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an error returned by the next `create_reservation` call
    pub fn fail_next(&self, err: StoreError) {
        self.failures.lock().push(err);
    }

    pub fn stored(&self) -> Vec<Reservation> {
        self.stored.lock().clone()
    }

    pub fn requests_seen(&self) -> u64 {
        *self.next_id.lock()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<Reservation, StoreError> {
        let id = {
            let mut next_id = self.next_id.lock();
            *next_id += 1;
            *next_id
        };

        if !self.failures.lock().is_empty() {
            return Err(self.failures.lock().remove(0));
        }

        let mut stored = self.stored.lock();
        let candidate = BookingInterval::covering(request.start_date, request.end_date);
        if !is_range_available(
            &request.vehicle_id,
            &candidate,
            &stored,
            &BlockingPolicy::default(),
        ) {
            return Err(StoreError::Conflict(format!(
                "{} is already booked between {} and {}",
                request.vehicle_id, request.start_date, request.end_date
            )));
        }

        let reservation = request.to_reservation().with_id(format!("bk-{id}"));
        stored.push(reservation.clone());
        Ok(reservation)
    }
}

#[async_trait]
impl ReservationSource for InMemoryBookingStore {
    async fn reservations_for(&self, vehicle_id: &VehicleId) -> Result<Vec<Reservation>, SourceError> {
        Ok(self
            .stored
            .lock()
            .iter()
            .filter(|r| &r.vehicle_id == vehicle_id)
            .cloned()
            .collect())
    }
}

/// Fixed vehicle catalog
#[derive(Debug, Default)]
pub struct StaticVehicleCatalog {
    targets: HashMap<VehicleId, BookingTarget>,
}

impl StaticVehicleCatalog {
    pub fn new(targets: impl IntoIterator<Item = BookingTarget>) -> Self {
        Self {
            targets: targets
                .into_iter()
                .map(|t| (t.vehicle_id.clone(), t))
                .collect(),
        }
    }
}

#[async_trait]
impl VehicleCatalog for StaticVehicleCatalog {
    async fn booking_target(&self, vehicle_id: &VehicleId) -> Result<BookingTarget, SourceError> {
        self.targets
            .get(vehicle_id)
            .cloned()
            .ok_or_else(|| SourceError::VehicleNotFound(vehicle_id.to_string()))
    }
}
