//! Unified error system for the booking stack
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Availability errors
//! - 2xxx: Booking flow errors
//! - 3xxx: Payment errors
//! - 4xxx: Vehicle errors
//! - 9xxx: System and upstream errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::RangeUnavailable);
//!
//! // Create an error with details
//! let err = AppError::validation("Please fill in all fields")
//!     .with_detail("field", "customer_email");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
