//! 时间工具函数 - 日历日
//!
//! Availability works on calendar days only. "Today" is the current day in
//! the configured zone, or in the system local zone when none is set.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

/// 解析 IANA 时区名称
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

/// Current calendar day in `tz` (system local time when `None`)
pub fn today_in(tz: Option<Tz>) -> NaiveDate {
    match tz {
        Some(tz) => chrono::Utc::now().with_timezone(&tz).date_naive(),
        None => chrono::Local::now().date_naive(),
    }
}

/// Number of days in a month, `None` for an invalid month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
