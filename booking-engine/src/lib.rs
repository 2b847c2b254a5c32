//! Booking Engine - vehicle availability and booking-conflict core
//!
//! # Architecture
//!
//! ```text
//! booking-engine/
//! ├── core/          # EngineConfig (environment driven)
//! ├── interval       # BookingInterval: overlap / containment / day expansion
//! ├── availability/  # Blocking policy, booked dates, selectability, calendar grid
//! ├── selection      # Two-click range selection state machine
//! ├── pricing/       # Inclusive day count, totals, price display
//! ├── booking/       # Multi-step booking flow, collaborator traits, payment
//! ├── search         # Vehicle availability search for listings
//! └── utils/         # Logging, time, validation helpers
//! ```
//!
//! The engine never fetches data or reads session state on its own: the host
//! hands it a [`booking::ReservationSource`], a [`booking::PaymentGateway`]
//! and a [`booking::BookingStore`], plus a read-only
//! [`shared::SessionContext`].

pub mod availability;
pub mod booking;
pub mod core;
pub mod interval;
pub mod pricing;
pub mod search;
pub mod selection;
pub mod utils;

// Re-export 公共类型
pub use availability::{BlockingPolicy, BookedDatesCache, ReservationSet, SelectionContext};
pub use booking::{BookingFlow, BookingStep, FlowError};
pub use core::EngineConfig;
pub use interval::BookingInterval;
pub use pricing::PriceQuote;
pub use selection::RangeSelection;
pub use utils::{AppError, AppResult};
