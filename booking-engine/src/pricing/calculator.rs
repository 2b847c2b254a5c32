//! Price Calculator
//!
//! `total = price_per_day * total_days`, where `total_days` counts both the
//! pickup and the return day.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::selection::DateRange;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to 2 decimal places
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Inclusive day count of a range, `0` unless both ends are set
pub fn total_days(range: &DateRange) -> i64 {
    match (range.start, range.end) {
        (Some(start), Some(end)) => ((end - start).num_days() + 1).max(0),
        _ => 0,
    }
}

/// `price_per_day * total_days`, rounded to cents; `None` on overflow
pub fn checked_total(price_per_day: Decimal, total_days: i64) -> Option<Decimal> {
    if total_days <= 0 {
        return Some(Decimal::ZERO);
    }
    price_per_day
        .checked_mul(Decimal::from(total_days))
        .map(round_money)
}

/// [`checked_total`] for display, saturating at `Decimal::MAX`
pub fn compute_total(price_per_day: Decimal, total_days: i64) -> Decimal {
    checked_total(price_per_day, total_days).unwrap_or(Decimal::MAX)
}

/// Display an amount: `"$240"` for USD, `"240 EUR"` otherwise
///
/// Cents are shown only when the amount is fractional.
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let amount = round_money(amount);
    let number = if amount.fract().is_zero() {
        amount.trunc().normalize().to_string()
    } else {
        format!("{:.2}", amount)
    };

    if currency.eq_ignore_ascii_case("USD") {
        format!("${number}")
    } else {
        format!("{number} {}", currency.to_ascii_uppercase())
    }
}

/// Price breakdown for a selected range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price_per_day: Decimal,
    pub total_days: i64,
    pub total: Decimal,
}

impl PriceQuote {
    pub fn new(price_per_day: Decimal, total_days: i64) -> Self {
        let total_days = total_days.max(0);
        Self {
            price_per_day,
            total_days,
            total: compute_total(price_per_day, total_days),
        }
    }

    pub fn for_range(price_per_day: Decimal, range: &DateRange) -> Self {
        Self::new(price_per_day, total_days(range))
    }

    /// `"$80 × 3 days"`
    pub fn summary(&self, currency: &str) -> String {
        let unit = if self.total_days == 1 { "day" } else { "days" };
        format!(
            "{} × {} {}",
            format_money(self.price_per_day, currency),
            self.total_days,
            unit
        )
    }

    pub fn formatted_total(&self, currency: &str) -> String {
        format_money(self.total, currency)
    }
}
