//! Range Selection
//!
//! Two-click date range gesture: the first click picks the start, the second
//! picks the end. A second click before the start restarts the selection at
//! that day. Clicks on non-selectable days are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::availability::{SelectionContext, is_date_selectable};
use crate::interval::BookingInterval;

/// Selected dates as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Interval for a complete range
    pub fn interval(&self) -> Option<BookingInterval> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => BookingInterval::new(start, end).ok(),
            _ => None,
        }
    }
}

/// Selection state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RangeSelection {
    #[default]
    Empty,
    StartPicked {
        start: NaiveDate,
    },
    RangeComplete {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl RangeSelection {
    pub fn new() -> Self {
        Self::Empty
    }

    /// Context for judging the next click
    pub fn context(&self) -> SelectionContext {
        match *self {
            Self::StartPicked { start } => SelectionContext::picking_end(start),
            Self::Empty | Self::RangeComplete { .. } => SelectionContext::picking_start(),
        }
    }

    /// Handle a day click; returns whether the selection changed
    pub fn click(&mut self, date: NaiveDate, today: NaiveDate, booked: &BTreeSet<NaiveDate>) -> bool {
        if !is_date_selectable(date, today, booked, self.context()) {
            tracing::debug!(%date, "ignored click on non-selectable day");
            return false;
        }

        *self = match *self {
            Self::StartPicked { start } if date >= start => Self::RangeComplete { start, end: date },
            // Empty, out-of-order second click, or a new gesture after a complete range
            _ => Self::StartPicked { start: date },
        };
        true
    }

    pub fn reset(&mut self) {
        *self = Self::Empty;
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match *self {
            Self::Empty => None,
            Self::StartPicked { start } | Self::RangeComplete { start, .. } => Some(start),
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match *self {
            Self::RangeComplete { end, .. } => Some(end),
            _ => None,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start(),
            end: self.end(),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::RangeComplete { .. })
    }

    pub fn interval(&self) -> Option<BookingInterval> {
        match *self {
            Self::RangeComplete { start, end } => Some(BookingInterval::covering(start, end)),
            _ => None,
        }
    }
}
