//! Availability Engine
//!
//! Pure functions over a reservation list. [`is_range_available`] is the
//! authoritative check; [`is_date_selectable`] only drives the interactive
//! calendar.

use chrono::NaiveDate;
use shared::{Reservation, VehicleId};
use std::collections::BTreeSet;
use std::ops::Bound::Excluded;

use super::policy::BlockingPolicy;
use crate::interval::BookingInterval;

/// In-progress selection state needed to judge a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionContext {
    pub start: Option<NaiveDate>,
    pub selecting_end: bool,
}

impl SelectionContext {
    /// Next click picks a start date
    pub fn picking_start() -> Self {
        Self::default()
    }

    /// Next click picks the end date of a range starting at `start`
    pub fn picking_end(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            selecting_end: true,
        }
    }
}

fn blocking<'a>(
    vehicle_id: &'a VehicleId,
    reservations: &'a [Reservation],
    policy: &'a BlockingPolicy,
) -> impl Iterator<Item = &'a Reservation> + 'a {
    reservations
        .iter()
        .filter(move |r| &r.vehicle_id == vehicle_id && policy.blocks(r.status))
}

/// Every day covered by a blocking reservation of `vehicle_id`
pub fn booked_dates(
    vehicle_id: &VehicleId,
    reservations: &[Reservation],
    policy: &BlockingPolicy,
) -> BTreeSet<NaiveDate> {
    blocking(vehicle_id, reservations, policy)
        .flat_map(|r| BookingInterval::of_reservation(r).expand_to_days())
        .collect()
}

pub fn is_date_booked(date: NaiveDate, booked: &BTreeSet<NaiveDate>) -> bool {
    booked.contains(&date)
}

/// Whether `date` may be clicked in the calendar
///
/// Past and booked days never are. When picking an end date, a day is also
/// rejected if a booked day lies strictly between the start and it.
pub fn is_date_selectable(
    date: NaiveDate,
    today: NaiveDate,
    booked: &BTreeSet<NaiveDate>,
    context: SelectionContext,
) -> bool {
    if date < today {
        return false;
    }
    if is_date_booked(date, booked) {
        return false;
    }

    if context.selecting_end
        && let Some(start) = context.start
        && date > start
        && booked.range((Excluded(start), Excluded(date))).next().is_some()
    {
        return false;
    }

    true
}

/// True iff `candidate` overlaps no blocking reservation of `vehicle_id`
pub fn is_range_available(
    vehicle_id: &VehicleId,
    candidate: &BookingInterval,
    reservations: &[Reservation],
    policy: &BlockingPolicy,
) -> bool {
    !blocking(vehicle_id, reservations, policy)
        .any(|r| BookingInterval::of_reservation(r).overlaps(candidate))
}
