//! Month calendar view
//!
//! Rendering data for the availability calendar: a Sunday-first month grid
//! with per-day flags, plus the hint line shown under it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::engine::{is_date_booked, is_date_selectable};
use crate::selection::{DateRange, RangeSelection};
use crate::utils::time::{days_in_month, month_start};

/// A displayed month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthView {
    first_day: NaiveDate,
}

/// One day slot of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_past: bool,
    pub is_booked: bool,
    /// Equal to the selected start or end
    pub is_selected: bool,
    /// Inside a complete selected range, ends included
    pub is_in_range: bool,
    pub is_today: bool,
    pub is_selectable: bool,
}

impl MonthView {
    /// `None` for a month outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// Month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: month_start(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn previous(&self) -> Self {
        match self.first_day.pred_opt() {
            Some(last_of_previous) => Self::containing(last_of_previous),
            None => *self,
        }
    }

    pub fn next(&self) -> Self {
        self.days()
            .last()
            .and_then(|last| last.succ_opt())
            .map(Self::containing)
            .unwrap_or(*self)
    }

    /// "March 2024"
    pub fn title(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    pub fn day_count(&self) -> u32 {
        days_in_month(self.year(), self.month()).unwrap_or(0)
    }

    /// Empty slots before the 1st in a Sunday-first week
    pub fn leading_blanks(&self) -> usize {
        self.first_day.weekday().num_days_from_sunday() as usize
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        self.first_day.iter_days().take(self.day_count() as usize)
    }

    /// Sunday-first grid: leading `None` slots, then one cell per day
    pub fn grid(
        &self,
        today: NaiveDate,
        booked: &BTreeSet<NaiveDate>,
        selection: &RangeSelection,
    ) -> Vec<Option<DayCell>> {
        let range = selection.range();
        let context = selection.context();

        let mut cells: Vec<Option<DayCell>> = vec![None; self.leading_blanks()];
        cells.extend(self.days().map(|date| {
            Some(DayCell {
                date,
                is_past: date < today,
                is_booked: is_date_booked(date, booked),
                is_selected: range.start == Some(date) || range.end == Some(date),
                is_in_range: in_range(&range, date),
                is_today: date == today,
                is_selectable: is_date_selectable(date, today, booked, context),
            })
        }));
        cells
    }
}

fn in_range(range: &DateRange, date: NaiveDate) -> bool {
    range.interval().is_some_and(|i| i.contains_date(date))
}

/// Hint shown under the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionPrompt {
    PickStart,
    PickEnd { start: NaiveDate },
    Complete { start: NaiveDate, end: NaiveDate },
}

impl SelectionPrompt {
    pub fn for_selection(selection: &RangeSelection) -> Self {
        match *selection {
            RangeSelection::Empty => Self::PickStart,
            RangeSelection::StartPicked { start } => Self::PickEnd { start },
            RangeSelection::RangeComplete { start, end } => Self::Complete { start, end },
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::PickStart => "Click a date to select your pickup date".to_string(),
            Self::PickEnd { start } => {
                format!("Start: {} - Now select end date", start.format("%b %-d, %Y"))
            }
            Self::Complete { start, end } => format!(
                "{} - {}",
                start.format("%b %-d"),
                end.format("%b %-d, %Y")
            ),
        }
    }
}
