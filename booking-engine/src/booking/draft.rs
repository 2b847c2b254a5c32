use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::SessionContext;

use super::step::BookingStep;
use crate::pricing::{compute_total, total_days};
use crate::selection::{DateRange, RangeSelection};

/// In-progress booking wizard state
///
/// Reset to a fresh draft whenever the flow is closed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingDraft {
    pub(crate) step: BookingStep,
    pub(crate) selection: RangeSelection,
    pub(crate) customer_name: String,
    pub(crate) customer_email: String,
    pub(crate) is_processing: bool,
}

impl BookingDraft {
    /// Fresh draft, contact fields prefilled from the signed-in user
    pub fn new(session: &SessionContext) -> Self {
        let (customer_name, customer_email) = match &session.current_user {
            Some(user) => (user.full_name.clone(), user.email.clone()),
            None => (String::new(), String::new()),
        };
        Self {
            customer_name,
            customer_email,
            ..Self::default()
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn selection(&self) -> &RangeSelection {
        &self.selection
    }

    pub fn range(&self) -> DateRange {
        self.selection.range()
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// Inclusive day count, `0` until both dates are picked
    pub fn total_days(&self) -> i64 {
        total_days(&self.range())
    }

    pub fn total_price(&self, price_per_day: Decimal) -> Decimal {
        compute_total(price_per_day, self.total_days())
    }
}
