//! Lenient deserializers for backend rows
//!
//! The backend is not consistent about id types (numeric `car_id` vs string
//! ids in fixtures) or date encoding (`2024-04-10` vs full timestamps).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Uint(u64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Uint(n) => n.to_string(),
        }
    }
}

/// Accept a JSON string or integer and keep it as a string
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

/// Optional variant of [`string_or_number`]
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer)
        .map(|value| value.map(StringOrNumber::into_string))
}

/// Parse an ISO date or timestamp, keeping only the calendar day
///
/// Time-of-day and offset are ignored: `2024-04-10T23:00:00-05:00` is
/// April 10th.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let day_part = value.get(..10)?;
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}

/// Deserialize a calendar date from an ISO date or timestamp string
pub fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| D::Error::custom(format!("invalid calendar date: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        assert_eq!(parse_calendar_date("2024-04-10"), Some(expected));
        assert_eq!(parse_calendar_date("2024-04-10T00:00:00Z"), Some(expected));
        assert_eq!(
            parse_calendar_date("2024-04-10T23:30:00-05:00"),
            Some(expected)
        );
        assert_eq!(parse_calendar_date(" 2024-04-10 "), Some(expected));
    }

    #[test]
    fn test_parse_calendar_date_rejects_garbage() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("2024-4-1"), None);
        assert_eq!(parse_calendar_date("2024-13-01"), None);
        assert_eq!(parse_calendar_date("not a date"), None);
    }

    #[test]
    fn test_string_or_number() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(deserialize_with = "string_or_number")]
            id: String,
        }

        let row: Row = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(row.id, "42");
        let row: Row = serde_json::from_str(r#"{"id": "car-7"}"#).unwrap();
        assert_eq!(row.id, "car-7");
    }
}
