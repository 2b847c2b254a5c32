//! Data models
//!
//! Shared between the booking engine and the REST client.
//! Row shapes follow the marketplace backend (snake_case, lowercase statuses).

pub mod de;
pub mod reservation;
pub mod session;
pub mod vehicle;

// Re-exports
pub use reservation::*;
pub use session::*;
pub use vehicle::*;
