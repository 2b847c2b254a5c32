//! Booking flow controller
//!
//! Owns the draft of one open booking dialog. All transitions are
//! synchronous except [`BookingFlow::submit_payment`], which awaits the
//! payment gateway and the booking store.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    BookingTarget, CreateReservationRequest, ReservationStatus, SessionContext, VehicleId,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use validator::Validate;

use super::draft::BookingDraft;
use super::error::FlowError;
use super::payment::{PaymentReceipt, PaymentRequestMethod};
use super::step::BookingStep;
use super::traits::{BookingStore, PaymentGateway, ReservationSource, VehicleCatalog};
use crate::availability::{
    BlockingPolicy, BookedDates, BookedDatesCache, DayCell, MonthView, ReservationSet,
    SelectionPrompt, is_range_available,
};
use crate::core::EngineConfig;
use crate::interval::BookingInterval;
use crate::pricing::{PriceQuote, checked_total};
use crate::selection::{DateRange, RangeSelection};
use crate::utils::ErrorCode;
use crate::utils::time::today_in;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, describe_validation_errors, validate_required_text,
};

/// Summary shown once a booking is confirmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub reservation_id: Option<String>,
    pub vehicle_id: VehicleId,
    pub vehicle_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_days: i64,
    pub total_price: Decimal,
    pub customer_name: String,
    pub customer_email: String,
    pub payment_reference: String,
}

/// Booking wizard for one vehicle
#[derive(Debug)]
pub struct BookingFlow {
    target: BookingTarget,
    session: SessionContext,
    policy: BlockingPolicy,
    currency: String,
    timezone: Option<Tz>,
    /// Fixed "today" set by the host; the clock is used when `None`
    pinned_today: Option<NaiveDate>,
    today: NaiveDate,
    reservations: ReservationSet,
    cache: Arc<BookedDatesCache>,
    draft: BookingDraft,
    receipt: Option<PaymentReceipt>,
    confirmation: Option<Confirmation>,
    error: Option<FlowError>,
}

impl BookingFlow {
    /// Open a flow with an already loaded reservation set
    ///
    /// An empty set means the vehicle has no bookings.
    pub fn open(
        target: BookingTarget,
        reservations: impl Into<ReservationSet>,
        session: SessionContext,
        config: &EngineConfig,
    ) -> Self {
        info!(
            vehicle_id = %target.vehicle_id,
            policy = %config.blocking_policy,
            "Booking flow opened"
        );
        Self {
            draft: BookingDraft::new(&session),
            target,
            session,
            policy: config.blocking_policy.clone(),
            currency: config.currency.clone(),
            timezone: config.timezone,
            pinned_today: None,
            today: config.today(),
            reservations: reservations.into(),
            cache: Arc::new(BookedDatesCache::new()),
            receipt: None,
            confirmation: None,
            error: None,
        }
    }

    /// Open a flow, loading the vehicle's reservations first
    pub async fn open_with_source(
        target: BookingTarget,
        source: &dyn ReservationSource,
        session: SessionContext,
        config: &EngineConfig,
    ) -> Result<Self, FlowError> {
        let reservations = source
            .reservations_for(&target.vehicle_id)
            .await
            .map_err(|e| {
                warn!(vehicle_id = %target.vehicle_id, error = %e, "Failed to load reservations");
                FlowError::ReservationsUnavailable(e)
            })?;
        Ok(Self::open(target, reservations, session, config))
    }

    /// Open a flow for a vehicle id, looking up its name and rate first
    pub async fn open_from_catalog(
        vehicle_id: &VehicleId,
        catalog: &dyn VehicleCatalog,
        source: &dyn ReservationSource,
        session: SessionContext,
        config: &EngineConfig,
    ) -> Result<Self, FlowError> {
        let target = catalog
            .booking_target(vehicle_id)
            .await
            .map_err(FlowError::ReservationsUnavailable)?;
        Self::open_with_source(target, source, session, config).await
    }

    /// Share a booked-dates cache between flows
    pub fn with_cache(mut self, cache: Arc<BookedDatesCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Pin "today" (calendar day granularity); a pinned day is never
    /// refreshed from the clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.set_today(today);
        self
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.pinned_today = Some(today);
        self.today = today;
    }

    /// Re-read "today" from the clock unless it is pinned
    fn refresh_today(&mut self) {
        let today = self.pinned_today.unwrap_or_else(|| today_in(self.timezone));
        if today != self.today {
            debug!(from = %self.today, to = %today, "Day changed");
            self.today = today;
        }
    }

    /// Reload reservations; the current set is kept when loading fails
    pub async fn refresh_reservations(
        &mut self,
        source: &dyn ReservationSource,
    ) -> Result<(), FlowError> {
        match source.reservations_for(&self.target.vehicle_id).await {
            Ok(items) => {
                self.reservations.replace(items);
                debug!(
                    vehicle_id = %self.target.vehicle_id,
                    version = self.reservations.version(),
                    "Reservations refreshed"
                );
                Ok(())
            }
            Err(e) => {
                warn!(vehicle_id = %self.target.vehicle_id, error = %e, "Failed to refresh reservations");
                self.reject(FlowError::ReservationsUnavailable(e))
            }
        }
    }

    // ========== Dates ==========

    pub fn booked_dates(&self) -> BookedDates {
        self.cache
            .get_or_compute(&self.target.vehicle_id, &self.reservations, &self.policy)
    }

    /// Handle a calendar click; returns whether the selection changed
    ///
    /// Clicks outside the dates step and clicks on non-selectable days are
    /// ignored.
    pub fn click_day(&mut self, date: NaiveDate) -> bool {
        if self.draft.step != BookingStep::Dates {
            debug!(%date, step = %self.draft.step, "Ignored click outside dates step");
            return false;
        }
        self.refresh_today();
        let booked = self.booked_dates();
        let changed = self.draft.selection.click(date, self.today, &booked);
        if changed {
            self.error = None;
            debug!(selection = ?self.draft.selection, "Selection changed");
        }
        changed
    }

    pub fn calendar(&self, view: MonthView) -> Vec<Option<DayCell>> {
        view.grid(self.today, &self.booked_dates(), &self.draft.selection)
    }

    pub fn prompt(&self) -> SelectionPrompt {
        SelectionPrompt::for_selection(&self.draft.selection)
    }

    /// Gate `dates → details`: both dates picked, none of them past
    pub fn continue_to_details(&mut self) -> Result<(), FlowError> {
        self.require_step(BookingStep::Dates, "continue_to_details")?;
        let Some(interval) = self.draft.selection.interval() else {
            warn!(vehicle_id = %self.target.vehicle_id, "Dates gate failed: range incomplete");
            return self.reject(FlowError::DatesRequired);
        };
        self.refresh_today();
        self.ensure_not_past(&interval)?;
        self.advance(BookingStep::Details);
        Ok(())
    }

    // ========== Details ==========

    pub fn set_customer_name(&mut self, name: impl Into<String>) -> Result<(), FlowError> {
        self.require_step(BookingStep::Details, "set_customer_name")?;
        self.draft.customer_name = name.into();
        self.error = None;
        Ok(())
    }

    pub fn set_customer_email(&mut self, email: impl Into<String>) -> Result<(), FlowError> {
        self.require_step(BookingStep::Details, "set_customer_email")?;
        self.draft.customer_email = email.into();
        self.error = None;
        Ok(())
    }

    /// Gate `details → payment`: name and email filled in
    pub fn continue_to_payment(&mut self) -> Result<(), FlowError> {
        self.require_step(BookingStep::Details, "continue_to_payment")?;
        let checked = validate_required_text(&self.draft.customer_name, "customer_name", MAX_NAME_LEN)
            .and_then(|_| {
                validate_required_text(&self.draft.customer_email, "customer_email", MAX_EMAIL_LEN)
            });
        if let Err(e) = checked {
            warn!(vehicle_id = %self.target.vehicle_id, error = %e, "Details gate failed");
            let err = match e.code {
                ErrorCode::RequiredField => FlowError::ContactDetailsRequired,
                _ => FlowError::InvalidRequest(e.message),
            };
            return self.reject(err);
        }
        self.advance(BookingStep::Payment);
        Ok(())
    }

    /// Step back (`details → dates`, `payment → details`)
    ///
    /// Not allowed while a payment is processing or once a charge went
    /// through.
    pub fn back(&mut self) -> Result<(), FlowError> {
        let step = self.draft.step;
        if self.draft.is_processing {
            return Err(FlowError::PaymentInProgress);
        }
        if step == BookingStep::Confirmation {
            return Err(FlowError::AlreadyConfirmed);
        }
        if self.receipt.is_some() {
            return Err(FlowError::StepNotAllowed { step, action: "back" });
        }
        let previous = step
            .previous()
            .ok_or(FlowError::StepNotAllowed { step, action: "back" })?;
        self.error = None;
        self.draft.step = previous;
        debug!(from = %step, to = %previous, "Booking step back");
        Ok(())
    }

    // ========== Payment ==========

    /// Gate `payment → confirmation`
    ///
    /// Re-checks availability, charges (at most once per draft) and stores
    /// the reservation. Any failure leaves the flow on the payment step with
    /// the error visible, ready for another attempt.
    pub async fn submit_payment(
        &mut self,
        method: PaymentRequestMethod,
        gateway: &dyn PaymentGateway,
        store: &dyn BookingStore,
    ) -> Result<Confirmation, FlowError> {
        self.require_step(BookingStep::Payment, "submit_payment")?;
        if self.draft.is_processing {
            return Err(FlowError::PaymentInProgress);
        }

        if let PaymentRequestMethod::Card(card) = &method
            && let Err(e) = card.validate()
        {
            return self.reject(e.into());
        }

        let Some(interval) = self.draft.selection.interval() else {
            return self.reject(FlowError::DatesRequired);
        };
        self.refresh_today();
        self.ensure_not_past(&interval)?;
        if !is_range_available(
            &self.target.vehicle_id,
            &interval,
            self.reservations.items(),
            &self.policy,
        ) {
            warn!(
                vehicle_id = %self.target.vehicle_id,
                start = %interval.start(),
                end = %interval.end(),
                "Selected range conflicts with an existing reservation"
            );
            return self.reject(FlowError::RangeUnavailable);
        }

        let quote = self.quote();
        if checked_total(quote.price_per_day, quote.total_days).is_none() {
            warn!(
                vehicle_id = %self.target.vehicle_id,
                price_per_day = %quote.price_per_day,
                total_days = quote.total_days,
                "Total price overflows"
            );
            return self.reject(FlowError::PriceOutOfRange);
        }
        let mut request = CreateReservationRequest {
            vehicle_id: self.target.vehicle_id.clone(),
            start_date: interval.start(),
            end_date: interval.end(),
            customer_name: self.draft.customer_name.trim().to_string(),
            customer_email: self.draft.customer_email.trim().to_string(),
            total_price: quote.total,
            status: ReservationStatus::Confirmed,
            user_id: self.session.user_id().map(str::to_string),
            payment_reference: None,
        };
        if let Err(errors) = request.validate() {
            return self.reject(FlowError::InvalidRequest(describe_validation_errors(
                &errors,
            )));
        }

        self.draft.is_processing = true;
        self.error = None;

        let receipt = match self.receipt.clone() {
            Some(receipt) => {
                info!(reference = %receipt.reference, "Reusing payment receipt from earlier attempt");
                receipt
            }
            None => match gateway.submit_payment(quote.total, &method).await {
                Ok(receipt) => {
                    info!(
                        reference = %receipt.reference,
                        amount = %receipt.amount,
                        method = ?receipt.method,
                        "Payment approved"
                    );
                    self.receipt = Some(receipt.clone());
                    receipt
                }
                Err(e) => {
                    self.draft.is_processing = false;
                    warn!(vehicle_id = %self.target.vehicle_id, error = %e, "Payment failed");
                    return self.reject(FlowError::Payment(e));
                }
            },
        };

        request.payment_reference = Some(receipt.reference.clone());
        let stored = match store.create_reservation(&request).await {
            Ok(stored) => stored,
            Err(e) => {
                self.draft.is_processing = false;
                error!(
                    vehicle_id = %self.target.vehicle_id,
                    reference = %receipt.reference,
                    error = %e,
                    "Payment taken but reservation could not be stored"
                );
                return self.reject(FlowError::PersistenceFailed(e));
            }
        };

        let confirmation = Confirmation {
            reservation_id: stored.id.clone(),
            vehicle_id: self.target.vehicle_id.clone(),
            vehicle_name: self.target.vehicle_name.clone(),
            start: interval.start(),
            end: interval.end(),
            total_days: quote.total_days,
            total_price: quote.total,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            payment_reference: receipt.reference,
        };

        self.reservations.push(stored);
        self.draft.is_processing = false;
        self.draft.step = BookingStep::Confirmation;
        self.confirmation = Some(confirmation.clone());

        info!(
            vehicle_id = %confirmation.vehicle_id,
            reservation_id = ?confirmation.reservation_id,
            start = %confirmation.start,
            end = %confirmation.end,
            total = %confirmation.total_price,
            "Booking confirmed"
        );
        Ok(confirmation)
    }

    // ========== Close ==========

    /// Abandon or finish the flow: back to a fresh draft on the dates step
    ///
    /// Returns the receipt of a charge whose booking was never stored, so the
    /// host can refund it.
    pub fn close(&mut self) -> Option<PaymentReceipt> {
        let orphaned = match (self.receipt.take(), &self.confirmation) {
            (Some(receipt), None) => {
                error!(
                    vehicle_id = %self.target.vehicle_id,
                    reference = %receipt.reference,
                    amount = %receipt.amount,
                    "Flow closed with a charge but no stored booking"
                );
                Some(receipt)
            }
            _ => None,
        };
        info!(
            vehicle_id = %self.target.vehicle_id,
            step = %self.draft.step,
            "Booking flow closed"
        );
        self.draft = BookingDraft::new(&self.session);
        self.confirmation = None;
        self.error = None;
        self.refresh_today();
        orphaned
    }

    // ========== Accessors ==========

    pub fn step(&self) -> BookingStep {
        self.draft.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn selection(&self) -> &RangeSelection {
        &self.draft.selection
    }

    pub fn range(&self) -> DateRange {
        self.draft.range()
    }

    pub fn target(&self) -> &BookingTarget {
        &self.target
    }

    pub fn reservations(&self) -> &ReservationSet {
        &self.reservations
    }

    pub fn policy(&self) -> &BlockingPolicy {
        &self.policy
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn quote(&self) -> PriceQuote {
        PriceQuote::for_range(self.target.price_per_day, &self.draft.range())
    }

    pub fn total_days(&self) -> i64 {
        self.draft.total_days()
    }

    pub fn total_price(&self) -> Decimal {
        self.draft.total_price(self.target.price_per_day)
    }

    /// `"$80 × 3 days"`
    pub fn price_summary(&self) -> String {
        self.quote().summary(&self.currency)
    }

    pub fn formatted_total(&self) -> String {
        self.quote().formatted_total(&self.currency)
    }

    /// Error from the last failed action, cleared by the next input
    pub fn error(&self) -> Option<&FlowError> {
        self.error.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.draft.is_processing
    }

    pub fn receipt(&self) -> Option<&PaymentReceipt> {
        self.receipt.as_ref()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    // ========== Internal ==========

    fn ensure_not_past(&mut self, interval: &BookingInterval) -> Result<(), FlowError> {
        if interval.start() < self.today {
            warn!(
                vehicle_id = %self.target.vehicle_id,
                start = %interval.start(),
                today = %self.today,
                "Selected range starts in the past"
            );
            return self.reject(FlowError::DatesInPast {
                start: interval.start(),
                today: self.today,
            });
        }
        Ok(())
    }

    fn require_step(&self, expected: BookingStep, action: &'static str) -> Result<(), FlowError> {
        match self.draft.step {
            step if step == expected => Ok(()),
            BookingStep::Confirmation => Err(FlowError::AlreadyConfirmed),
            step => Err(FlowError::StepNotAllowed { step, action }),
        }
    }

    fn advance(&mut self, to: BookingStep) {
        let from = self.draft.step;
        self.error = None;
        self.draft.step = to;
        info!(vehicle_id = %self.target.vehicle_id, %from, %to, "Booking step advanced");
    }

    /// Record a user-visible error and return it
    fn reject<T>(&mut self, err: FlowError) -> Result<T, FlowError> {
        self.error = Some(err.clone());
        Err(err)
    }
}
