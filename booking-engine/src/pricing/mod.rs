//! Pricing
//!
//! Inclusive day counts and totals. All arithmetic uses `rust_decimal`;
//! formatting happens only for display.

pub mod calculator;

pub use calculator::{PriceQuote, checked_total, compute_total, format_money, total_days};
