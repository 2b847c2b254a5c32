//! Booking Interval
//!
//! A reservation occupies every calendar day from `start` to `end`, both
//! included. Two intervals overlap as soon as they share one day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{AppError, AppResult, ErrorCode, Reservation};

/// Inclusive range of calendar days, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl BookingInterval {
    /// Create an interval, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::new(ErrorCode::InvalidDateRange)
                .with_detail("start", start.to_string())
                .with_detail("end", end.to_string()));
        }
        Ok(Self { start, end })
    }

    /// One-day interval
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Interval spanning both dates in whichever order they come
    pub fn covering(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Days occupied by a reservation
    ///
    /// Rows with inverted dates still block every day between them.
    pub fn of_reservation(reservation: &Reservation) -> Self {
        Self::covering(reservation.start_date, reservation.end_date)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// True unless one interval ends before the other starts
    pub fn overlaps(&self, other: &BookingInterval) -> bool {
        !(self.end < other.start || self.start > other.end)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every calendar day from start to end inclusive
    ///
    /// Each call returns a fresh iterator.
    pub fn expand_to_days(&self) -> impl Iterator<Item = NaiveDate> + Clone + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Inclusive day count (`1` for a single-day interval)
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
