//! End-to-end booking flow scenarios against in-memory collaborators

use async_trait::async_trait;
use booking_engine::availability::{BlockingPolicy, BookedDatesCache, MonthView, SelectionPrompt};
use booking_engine::booking::{
    BookingFlow, BookingStep, CardDetails, FlowError, InMemoryBookingStore,
    InMemoryReservationSource, PaymentError, PaymentGateway, PaymentReceipt,
    PaymentRequestMethod, SimulatedOutcome, SimulatedPaymentGateway, SourceError,
    StaticVehicleCatalog, StoreError,
};
use booking_engine::core::EngineConfig;
use booking_engine::selection::DateRange;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{
    AppError, BookingTarget, CurrentUser, ErrorCode, Reservation, ReservationStatus,
    SessionContext, VehicleId,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn target() -> BookingTarget {
    BookingTarget::new("car-1", "Tesla Model 3", Decimal::from(80))
}

/// Confirmed [2024-04-10, 2024-04-12] on car-1
fn april_booking() -> Reservation {
    Reservation::new("car-1", date(4, 10), date(4, 12), ReservationStatus::Confirmed)
        .unwrap()
        .with_id("bk-existing")
}

fn open_flow(reservations: Vec<Reservation>) -> BookingFlow {
    BookingFlow::open(
        target(),
        reservations,
        SessionContext::anonymous(),
        &EngineConfig::default(),
    )
    .with_today(date(3, 20))
}

fn card() -> PaymentRequestMethod {
    PaymentRequestMethod::Card(CardDetails::from_input(
        "Jane Doe",
        "4242 4242 4242 4242",
        "12/26",
        "123",
    ))
}

fn to_payment(flow: &mut BookingFlow, start: NaiveDate, end: NaiveDate) {
    assert!(flow.click_day(start));
    assert!(flow.click_day(end));
    flow.continue_to_details().unwrap();
    flow.set_customer_name("Jane Doe").unwrap();
    flow.set_customer_email("jane@example.com").unwrap();
    flow.continue_to_payment().unwrap();
}

/// Gateway counting charges, failing the first `failures` attempts
#[derive(Default)]
struct CountingGateway {
    failures: usize,
    attempts: AtomicUsize,
}

impl CountingGateway {
    fn failing_first(failures: usize) -> Self {
        Self {
            failures,
            attempts: AtomicUsize::new(0),
        }
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for CountingGateway {
    async fn submit_payment(
        &self,
        amount: Decimal,
        method: &PaymentRequestMethod,
    ) -> Result<PaymentReceipt, PaymentError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(PaymentError::Unavailable("gateway timeout".into()));
        }
        SimulatedPaymentGateway::instant()
            .submit_payment(amount, method)
            .await
    }
}

// ========== Scenario A ==========

#[test]
fn scenario_a_end_date_cannot_straddle_booking() {
    let mut flow = open_flow(vec![april_booking()]);

    assert!(flow.click_day(date(4, 8)));
    assert_eq!(flow.prompt(), SelectionPrompt::PickEnd { start: date(4, 8) });

    // 04-10 is booked and lies between the start and 04-11
    assert!(!flow.click_day(date(4, 11)));
    assert!(!flow.click_day(date(4, 14)));
    assert_eq!(flow.range().end, None);

    let grid = flow.calendar(MonthView::new(2024, 4).unwrap());
    let nine = grid.iter().flatten().find(|c| c.date == date(4, 9)).unwrap();
    assert!(nine.is_selectable);

    assert!(flow.click_day(date(4, 9)));
    assert_eq!(
        flow.range(),
        DateRange {
            start: Some(date(4, 8)),
            end: Some(date(4, 9))
        }
    );
    assert_eq!(flow.total_days(), 2);
}

// ========== Scenario B ==========

#[test]
fn scenario_b_range_after_booking_is_available() {
    let mut flow = open_flow(vec![april_booking()]);

    assert!(flow.click_day(date(4, 13)));
    assert!(flow.click_day(date(4, 15)));
    assert_eq!(flow.total_days(), 3);

    let interval = flow.selection().interval().unwrap();
    assert!(booking_engine::availability::is_range_available(
        &VehicleId::new("car-1"),
        &interval,
        flow.reservations().items(),
        flow.policy(),
    ));
}

// ========== Scenario C ==========

#[test]
fn scenario_c_details_gate_requires_email() {
    let mut flow = open_flow(Vec::new());
    flow.click_day(date(5, 1));
    flow.click_day(date(5, 3));
    flow.continue_to_details().unwrap();
    flow.set_customer_name("Jane Doe").unwrap();

    let err = flow.continue_to_payment().unwrap_err();
    assert_eq!(err, FlowError::ContactDetailsRequired);
    assert_eq!(flow.step(), BookingStep::Details);
    assert_eq!(flow.error(), Some(&FlowError::ContactDetailsRequired));

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::ContactDetailsRequired);
}

// ========== Scenario D ==========

#[tokio::test]
async fn scenario_d_happy_path_then_close() {
    let mut flow = open_flow(Vec::new());
    let store = InMemoryBookingStore::new();
    let gateway = CountingGateway::default();

    to_payment(&mut flow, date(5, 1), date(5, 3));
    assert_eq!(flow.total_price(), Decimal::from(240));
    assert_eq!(flow.price_summary(), "$80 × 3 days");
    assert_eq!(flow.formatted_total(), "$240");

    let confirmation = flow.submit_payment(card(), &gateway, &store).await.unwrap();

    assert_eq!(flow.step(), BookingStep::Confirmation);
    assert!(!flow.is_processing());
    assert_eq!(confirmation.total_price, Decimal::from(240));
    assert_eq!(confirmation.total_days, 3);
    assert_eq!(confirmation.vehicle_name, "Tesla Model 3");
    assert_eq!(confirmation.reservation_id.as_deref(), Some("bk-1"));
    assert_eq!(flow.confirmation(), Some(&confirmation));
    assert_eq!(gateway.attempts(), 1);

    let stored = store.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, ReservationStatus::Confirmed);
    assert_eq!(stored[0].start_date, date(5, 1));

    // The new booking now blocks its own days
    assert!(flow.booked_dates().contains(&date(5, 2)));

    flow.close();
    assert_eq!(flow.step(), BookingStep::Dates);
    assert_eq!(flow.range(), DateRange::default());
    assert_eq!(flow.confirmation(), None);
    assert_eq!(flow.total_days(), 0);
}

// ========== Payment failures ==========

#[tokio::test]
async fn declined_payment_stays_on_payment_and_can_retry() {
    let mut flow = open_flow(Vec::new());
    let store = InMemoryBookingStore::new();
    let declining = SimulatedPaymentGateway::instant()
        .with_outcome(SimulatedOutcome::Decline("insufficient funds".into()));

    to_payment(&mut flow, date(5, 1), date(5, 3));

    let err = flow.submit_payment(card(), &declining, &store).await.unwrap_err();
    assert_eq!(
        err,
        FlowError::Payment(PaymentError::Declined("insufficient funds".into()))
    );
    assert!(err.is_retryable());
    assert_eq!(flow.step(), BookingStep::Payment);
    assert!(!flow.is_processing());
    assert!(flow.error().is_some());
    assert!(store.stored().is_empty());

    flow.submit_payment(card(), &SimulatedPaymentGateway::instant(), &store)
        .await
        .unwrap();
    assert_eq!(flow.step(), BookingStep::Confirmation);
    assert!(flow.error().is_none());
}

#[tokio::test]
async fn gateway_outage_then_success() {
    let mut flow = open_flow(Vec::new());
    let store = InMemoryBookingStore::new();
    let gateway = CountingGateway::failing_first(1);

    to_payment(&mut flow, date(5, 1), date(5, 3));

    let err = flow
        .submit_payment(PaymentRequestMethod::Paypal, &gateway, &store)
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Payment(PaymentError::Unavailable(_))));

    flow.submit_payment(PaymentRequestMethod::Paypal, &gateway, &store)
        .await
        .unwrap();
    assert_eq!(gateway.attempts(), 2);
}

#[tokio::test]
async fn persistence_failure_retries_without_charging_again() {
    let mut flow = open_flow(Vec::new());
    let store = InMemoryBookingStore::new();
    let gateway = CountingGateway::default();
    store.fail_next(StoreError::Unavailable("connection reset".into()));

    to_payment(&mut flow, date(5, 1), date(5, 3));

    let err = flow.submit_payment(card(), &gateway, &store).await.unwrap_err();
    assert!(matches!(err, FlowError::PersistenceFailed(_)));
    assert_eq!(AppError::from(err).code, ErrorCode::PersistenceFailed);
    assert_eq!(flow.step(), BookingStep::Payment);
    assert!(flow.receipt().is_some());

    // Paid already: going back to change dates is refused
    assert!(matches!(flow.back(), Err(FlowError::StepNotAllowed { .. })));

    let confirmation = flow.submit_payment(card(), &gateway, &store).await.unwrap();
    assert_eq!(gateway.attempts(), 1);
    assert_eq!(
        Some(confirmation.payment_reference.as_str()),
        flow.receipt().map(|r| r.reference.as_str())
    );
    assert_eq!(store.requests_seen(), 2);
}

#[tokio::test]
async fn conflict_found_at_payment_gate() {
    let source = InMemoryReservationSource::new();
    let mut flow = BookingFlow::open_with_source(
        target(),
        &source,
        SessionContext::anonymous(),
        &EngineConfig::default(),
    )
    .await
    .unwrap()
    .with_today(date(3, 20));

    to_payment(&mut flow, date(5, 1), date(5, 3));

    // Someone else books May 2nd while this customer fills in details
    source.insert(
        Reservation::new("car-1", date(5, 2), date(5, 2), ReservationStatus::Pending).unwrap(),
    );
    flow.refresh_reservations(&source).await.unwrap();

    let gateway = CountingGateway::default();
    let err = flow
        .submit_payment(card(), &gateway, &InMemoryBookingStore::new())
        .await
        .unwrap_err();
    assert_eq!(err, FlowError::RangeUnavailable);
    assert_eq!(flow.step(), BookingStep::Payment);
    assert_eq!(gateway.attempts(), 0);
}

// ========== Opening ==========

#[tokio::test]
async fn unavailable_reservations_never_mean_no_bookings() {
    let source = InMemoryReservationSource::with_reservations([april_booking()]);
    source.set_failure(Some(SourceError::Unavailable("503".into())));

    let err = BookingFlow::open_with_source(
        target(),
        &source,
        SessionContext::anonymous(),
        &EngineConfig::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(
        AppError::from(err).code,
        ErrorCode::ReservationsUnavailable
    );
}

#[tokio::test]
async fn open_from_catalog_with_signed_in_user() {
    let catalog = StaticVehicleCatalog::new([target()]);
    let source = InMemoryReservationSource::with_reservations([april_booking()]);
    let session = SessionContext::signed_in(CurrentUser {
        id: "user-42".into(),
        full_name: "Jane Doe".into(),
        email: "jane@example.com".into(),
    });

    let mut flow = BookingFlow::open_from_catalog(
        &VehicleId::new("car-1"),
        &catalog,
        &source,
        session,
        &EngineConfig::default(),
    )
    .await
    .unwrap()
    .with_today(date(3, 20));

    assert_eq!(flow.booked_dates().len(), 3);

    flow.click_day(date(4, 20));
    flow.click_day(date(4, 21));
    flow.continue_to_details().unwrap();
    // Prefilled from the session
    flow.continue_to_payment().unwrap();

    let store = InMemoryBookingStore::new();
    let confirmation = flow
        .submit_payment(
            PaymentRequestMethod::GooglePay,
            &SimulatedPaymentGateway::instant(),
            &store,
        )
        .await
        .unwrap();
    assert_eq!(confirmation.customer_email, "jane@example.com");
    assert_eq!(confirmation.total_price, Decimal::from(160));

    let missing = BookingFlow::open_from_catalog(
        &VehicleId::new("car-404"),
        &catalog,
        &source,
        SessionContext::anonymous(),
        &EngineConfig::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(AppError::from(missing).code, ErrorCode::VehicleNotFound);
}

// ========== Policy and cache ==========

#[test]
fn confirmed_only_policy_ignores_pending() {
    let pending =
        Reservation::new("car-1", date(4, 10), date(4, 12), ReservationStatus::Pending).unwrap();
    let config = EngineConfig::default().with_blocking_policy(BlockingPolicy::confirmed_only());
    let mut flow = BookingFlow::open(target(), vec![pending.clone()], SessionContext::anonymous(), &config)
        .with_today(date(3, 20));
    assert!(flow.click_day(date(4, 11)));

    let mut strict = open_flow(vec![pending]);
    assert!(!strict.click_day(date(4, 11)));
}

#[test]
fn flows_share_a_cache() {
    let cache = Arc::new(BookedDatesCache::new());
    let a = open_flow(vec![april_booking()]).with_cache(Arc::clone(&cache));
    let b = open_flow(Vec::new()).with_cache(Arc::clone(&cache));

    assert_eq!(a.booked_dates().len(), 3);
    assert_eq!(a.booked_dates().len(), 3);
    // Same vehicle, different reservation set: never served from a's entry
    assert!(b.booked_dates().is_empty());

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
}

// ========== Stale days and orphaned charges ==========

#[test]
fn dates_gate_refuses_a_range_that_became_past() {
    let mut flow = open_flow(Vec::new());
    assert!(flow.click_day(date(3, 21)));
    assert!(flow.click_day(date(3, 22)));

    flow.set_today(date(3, 22));
    let err = flow.continue_to_details().unwrap_err();
    assert_eq!(
        err,
        FlowError::DatesInPast {
            start: date(3, 21),
            today: date(3, 22)
        }
    );
    assert_eq!(err.code(), ErrorCode::DateNotSelectable);
    assert_eq!(flow.step(), BookingStep::Dates);
}

#[tokio::test]
async fn payment_gate_refuses_a_range_that_became_past() {
    let mut flow = open_flow(Vec::new()).with_today(date(4, 1));
    let store = InMemoryBookingStore::new();
    let gateway = CountingGateway::default();
    to_payment(&mut flow, date(4, 2), date(4, 3));

    flow.set_today(date(4, 20));
    let err = flow.submit_payment(card(), &gateway, &store).await.unwrap_err();
    assert!(matches!(err, FlowError::DatesInPast { .. }));
    assert_eq!(flow.step(), BookingStep::Payment);
    assert_eq!(gateway.attempts(), 0);
    assert!(store.stored().is_empty());

    // Past days stay unclickable after reopening
    assert!(flow.close().is_none());
    assert!(!flow.click_day(date(4, 2)));
    assert!(flow.click_day(date(4, 21)));
}

#[tokio::test]
async fn close_hands_back_a_charge_without_booking() {
    let mut flow = open_flow(Vec::new());
    let store = InMemoryBookingStore::new();
    store.fail_next(StoreError::Unavailable("connection reset".into()));
    to_payment(&mut flow, date(5, 1), date(5, 3));

    flow.submit_payment(card(), &SimulatedPaymentGateway::instant(), &store)
        .await
        .unwrap_err();
    let charged = flow.receipt().cloned().unwrap();

    let orphaned = flow.close().unwrap();
    assert_eq!(orphaned, charged);
    assert_eq!(orphaned.amount, Decimal::from(240));
    assert!(flow.receipt().is_none());
    assert!(flow.close().is_none());
}

#[tokio::test]
async fn close_after_confirmation_has_nothing_to_refund() {
    let mut flow = open_flow(Vec::new());
    to_payment(&mut flow, date(5, 1), date(5, 3));
    flow.submit_payment(card(), &SimulatedPaymentGateway::instant(), &InMemoryBookingStore::new())
        .await
        .unwrap();
    assert!(flow.close().is_none());
}

#[tokio::test]
async fn overflowing_total_is_refused_before_charging() {
    let gateway = CountingGateway::default();
    let mut flow = BookingFlow::open(
        BookingTarget::new("car-1", "Gold Limousine", Decimal::MAX),
        Vec::<Reservation>::new(),
        SessionContext::anonymous(),
        &EngineConfig::default(),
    )
    .with_today(date(3, 20));
    to_payment(&mut flow, date(5, 1), date(5, 2));

    let err = flow
        .submit_payment(card(), &gateway, &InMemoryBookingStore::new())
        .await
        .unwrap_err();
    assert_eq!(err, FlowError::PriceOutOfRange);
    assert_eq!(AppError::from(err).code, ErrorCode::InvalidPrice);
    assert_eq!(gateway.attempts(), 0);
}

#[test]
fn empty_blocking_status_list_keeps_bookings_blocking() {
    let vars = |key: &str| (key == "RENTAL_BLOCKING_STATUSES").then(String::new);
    assert!(EngineConfig::try_from_lookup(vars).is_err());

    let config = EngineConfig::from_lookup(vars);
    let mut flow = BookingFlow::open(target(), vec![april_booking()], SessionContext::anonymous(), &config)
        .with_today(date(3, 20));
    assert!(!flow.click_day(date(4, 11)));
}
