use serde::{Deserialize, Serialize};
use std::fmt;

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStep {
    #[default]
    Dates,
    Details,
    Payment,
    Confirmation,
}

impl BookingStep {
    /// Numbered steps shown in the step indicator
    pub const WIZARD: [BookingStep; 3] = [Self::Dates, Self::Details, Self::Payment];

    pub fn index(&self) -> usize {
        match self {
            Self::Dates => 0,
            Self::Details => 1,
            Self::Payment => 2,
            Self::Confirmation => 3,
        }
    }

    pub fn is_before(&self, other: BookingStep) -> bool {
        self.index() < other.index()
    }

    pub fn next(&self) -> Option<BookingStep> {
        match self {
            Self::Dates => Some(Self::Details),
            Self::Details => Some(Self::Payment),
            Self::Payment => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    /// Back edge, if any (`details → dates`, `payment → details`)
    pub fn previous(&self) -> Option<BookingStep> {
        match self {
            Self::Details => Some(Self::Dates),
            Self::Payment => Some(Self::Details),
            Self::Dates | Self::Confirmation => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dates => "dates",
            Self::Details => "details",
            Self::Payment => "payment",
            Self::Confirmation => "confirmation",
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
