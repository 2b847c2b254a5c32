//! Card input helpers
//!
//! Formatting applied while the customer types, and the validation run
//! before a card payment is submitted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CARD_DIGITS: usize = 16;
const CVC_DIGITS: usize = 3;

fn digits(input: &str) -> impl Iterator<Item = char> + '_ {
    input.chars().filter(char::is_ascii_digit)
}

/// Digits only, at most 16, grouped in fours (`"4242 4242 4242 4242"`)
pub fn format_card_number(input: &str) -> String {
    let digits: Vec<char> = digits(input).take(CARD_DIGITS).collect();
    digits
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"1226"` → `"12/26"`; shorter input is returned as typed digits
pub fn format_expiry(input: &str) -> String {
    let digits: String = digits(input).take(4).collect();
    if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Digits only, at most 3
pub fn sanitize_cvc(input: &str) -> String {
    digits(input).take(CVC_DIGITS).collect()
}

/// Invalid card field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("Cardholder name is required")]
    MissingHolder,

    #[error("Card number must have 16 digits")]
    InvalidNumber,

    #[error("Expiry must be MM/YY")]
    InvalidExpiry,

    #[error("CVC must have 3 digits")]
    InvalidCvc,
}

/// Card entered on the payment step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub holder: String,
    pub number: String,
    pub expiry: String,
    pub cvc: String,
}

impl CardDetails {
    /// Build from raw input, applying the input formatters
    pub fn from_input(holder: &str, number: &str, expiry: &str, cvc: &str) -> Self {
        Self {
            holder: holder.trim().to_string(),
            number: format_card_number(number),
            expiry: format_expiry(expiry),
            cvc: sanitize_cvc(cvc),
        }
    }

    pub fn validate(&self) -> Result<(), CardError> {
        if self.holder.trim().is_empty() {
            return Err(CardError::MissingHolder);
        }
        if digits(&self.number).count() != CARD_DIGITS
            || self.number.chars().any(|c| !c.is_ascii_digit() && c != ' ')
        {
            return Err(CardError::InvalidNumber);
        }
        if !valid_expiry(&self.expiry) {
            return Err(CardError::InvalidExpiry);
        }
        if self.cvc.len() != CVC_DIGITS || !self.cvc.chars().all(|c| c.is_ascii_digit()) {
            return Err(CardError::InvalidCvc);
        }
        Ok(())
    }

    /// Last four digits, for receipts and logs
    pub fn last4(&self) -> String {
        let digits: Vec<char> = digits(&self.number).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u32>(), Ok(1..=12))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("4242-42"), "4242 42");
        assert_eq!(format_card_number("42424242424242421234"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("abc"), "");
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry("1226"), "12/26");
        assert_eq!(format_expiry("12/26"), "12/26");
        assert_eq!(format_expiry("12"), "12/");
        assert_eq!(format_expiry("1"), "1");
    }

    #[test]
    fn test_sanitize_cvc() {
        assert_eq!(sanitize_cvc("12a34"), "123");
    }

    fn card() -> CardDetails {
        CardDetails::from_input("Jane Doe", "4242424242424242", "1226", "123")
    }

    #[test]
    fn test_validate() {
        assert_eq!(card().validate(), Ok(()));
        assert_eq!(card().last4(), "4242");

        let mut c = card();
        c.holder = " ".into();
        assert_eq!(c.validate(), Err(CardError::MissingHolder));

        let mut c = card();
        c.number = format_card_number("4242");
        assert_eq!(c.validate(), Err(CardError::InvalidNumber));

        let mut c = card();
        c.expiry = "13/26".into();
        assert_eq!(c.validate(), Err(CardError::InvalidExpiry));

        let mut c = card();
        c.expiry = "00/26".into();
        assert_eq!(c.validate(), Err(CardError::InvalidExpiry));

        let mut c = card();
        c.cvc = "12".into();
        assert_eq!(c.validate(), Err(CardError::InvalidCvc));
    }
}
