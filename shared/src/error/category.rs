//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Availability errors
/// - 2xxx: Booking flow errors
/// - 3xxx: Payment errors
/// - 4xxx: Vehicle errors
/// - everything else: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Availability errors (1xxx)
    Availability,
    /// Booking flow errors (2xxx)
    Booking,
    /// Payment errors (3xxx)
    Payment,
    /// Vehicle errors (4xxx)
    Vehicle,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Availability,
            2000..3000 => Self::Booking,
            3000..4000 => Self::Payment,
            4000..5000 => Self::Vehicle,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Availability => "availability",
            Self::Booking => "booking",
            Self::Payment => "payment",
            Self::Vehicle => "vehicle",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1003), ErrorCategory::Availability);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Booking);
        assert_eq!(ErrorCategory::from_code(3002), ErrorCategory::Payment);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Vehicle);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(
            ErrorCode::RangeUnavailable.category(),
            ErrorCategory::Availability
        );
        assert_eq!(ErrorCode::DatesRequired.category(), ErrorCategory::Booking);
        assert_eq!(ErrorCode::PaymentDeclined.category(), ErrorCategory::Payment);
        assert_eq!(ErrorCode::PersistenceFailed.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Availability).unwrap();
        assert_eq!(json, "\"availability\"");

        let category: ErrorCategory = serde_json::from_str("\"payment\"").unwrap();
        assert_eq!(category, ErrorCategory::Payment);
    }
}
