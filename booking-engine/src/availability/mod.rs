//! Availability
//!
//! Derives booking legality for a vehicle from its reservations:
//!
//! - [`BlockingPolicy`] - which statuses make days unavailable
//! - [`ReservationSet`] - versioned reservation list handed in by the host
//! - [`engine`] - booked dates, day selectability, range availability
//! - [`BookedDatesCache`] - booked dates memoized per `(vehicle, version)`
//! - [`calendar`] - month grid rendering data

pub mod cache;
pub mod calendar;
pub mod engine;
pub mod policy;
pub mod set;

pub use cache::{BookedDates, BookedDatesCache, CacheStats};
pub use calendar::{DayCell, MonthView, SelectionPrompt};
pub use engine::{
    SelectionContext, booked_dates, is_date_booked, is_date_selectable, is_range_available,
};
pub use policy::{BlockingPolicy, PolicyError};
pub use set::ReservationSet;
