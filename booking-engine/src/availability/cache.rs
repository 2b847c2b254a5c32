//! Booked-dates cache
//!
//! Booked dates are recomputed only when the reservation set version or the
//! blocking policy changes. One entry is kept per vehicle.

use chrono::NaiveDate;
use parking_lot::Mutex;
use shared::VehicleId;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::engine::booked_dates;
use super::policy::BlockingPolicy;
use super::set::ReservationSet;

/// Shared, immutable booked-date set
pub type BookedDates = Arc<BTreeSet<NaiveDate>>;

#[derive(Debug)]
struct CacheEntry {
    version: u64,
    policy: BlockingPolicy,
    dates: BookedDates,
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<VehicleId, CacheEntry>,
    stats: CacheStats,
}

/// Memoized booked dates keyed by `(vehicle_id, reservation set version)`
#[derive(Debug, Default)]
pub struct BookedDatesCache {
    inner: Mutex<CacheInner>,
}

impl BookedDatesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Booked dates for `vehicle_id`, computed at most once per set version
    pub fn get_or_compute(
        &self,
        vehicle_id: &VehicleId,
        reservations: &ReservationSet,
        policy: &BlockingPolicy,
    ) -> BookedDates {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some(entry) = inner.entries.get(vehicle_id)
            && entry.version == reservations.version()
            && &entry.policy == policy
        {
            let dates = Arc::clone(&entry.dates);
            inner.stats.hits += 1;
            tracing::debug!(vehicle_id = %vehicle_id, version = reservations.version(), "booked dates cache hit");
            return dates;
        }

        let dates = Arc::new(booked_dates(vehicle_id, reservations.items(), policy));
        inner.stats.misses += 1;
        tracing::debug!(
            vehicle_id = %vehicle_id,
            version = reservations.version(),
            booked = dates.len(),
            "booked dates recomputed"
        );
        inner.entries.insert(
            vehicle_id.clone(),
            CacheEntry {
                version: reservations.version(),
                policy: policy.clone(),
                dates: Arc::clone(&dates),
            },
        );
        dates
    }

    pub fn invalidate(&self, vehicle_id: &VehicleId) {
        self.inner.lock().entries.remove(vehicle_id);
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }
}
