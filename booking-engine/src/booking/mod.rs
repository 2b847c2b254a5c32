//! Booking Flow
//!
//! Multi-step booking wizard for one vehicle:
//!
//! ```text
//! dates ──▶ details ──▶ payment ──▶ confirmation
//!   ◀──────────┘ ◀────────┘
//! ```
//!
//! Each forward move passes a gate. The payment gate re-checks availability,
//! charges through a [`PaymentGateway`] and persists through a
//! [`BookingStore`] before reaching `confirmation`.

pub mod card;
pub mod draft;
pub mod error;
pub mod flow;
pub mod memory;
pub mod payment;
pub mod step;
pub mod traits;

pub use card::{CardDetails, CardError, format_card_number, format_expiry, sanitize_cvc};
pub use draft::BookingDraft;
pub use error::FlowError;
pub use flow::{BookingFlow, Confirmation};
pub use memory::{InMemoryBookingStore, InMemoryReservationSource, StaticVehicleCatalog};
pub use payment::{
    PaymentMethod, PaymentReceipt, PaymentRequestMethod, SimulatedOutcome,
    SimulatedPaymentGateway,
};
pub use step::BookingStep;
pub use traits::{
    BookingStore, PaymentError, PaymentGateway, ReservationSource, SourceError, StoreError,
    VehicleCatalog,
};
