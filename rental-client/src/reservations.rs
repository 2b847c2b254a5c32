//! Booking backend over REST
//!
//! Row shapes of the `bookings` and `cars` tables. Ids come back as numbers
//! from the database and as strings from fixtures; both are accepted.

use async_trait::async_trait;
use booking_engine::booking::{
    BookingStore, ReservationSource, SourceError, StoreError, VehicleCatalog,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::de;
use shared::{BookingTarget, CreateReservationRequest, Reservation, ReservationStatus, VehicleId};

use crate::{ClientConfig, ClientError, ClientResult, RestClient};

const BOOKINGS: &str = "rest/v1/bookings";
const CARS: &str = "rest/v1/cars";

#[derive(Debug, Deserialize)]
struct BookingRow {
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    booking_id: Option<String>,
    #[serde(deserialize_with = "de::string_or_number")]
    car_id: String,
    #[serde(deserialize_with = "de::calendar_date")]
    start_date: NaiveDate,
    #[serde(deserialize_with = "de::calendar_date")]
    end_date: NaiveDate,
    status: ReservationStatus,
}

impl From<BookingRow> for Reservation {
    fn from(row: BookingRow) -> Self {
        Reservation {
            id: row.booking_id,
            vehicle_id: VehicleId::new(row.car_id),
            start_date: row.start_date,
            end_date: row.end_date,
            status: row.status,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewBookingRow<'a> {
    car_id: &'a str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    customer_name: &'a str,
    customer_email: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    total_price: Decimal,
    status: ReservationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_reference: Option<&'a str>,
}

impl<'a> From<&'a CreateReservationRequest> for NewBookingRow<'a> {
    fn from(request: &'a CreateReservationRequest) -> Self {
        Self {
            car_id: request.vehicle_id.as_str(),
            start_date: request.start_date,
            end_date: request.end_date,
            customer_name: request.customer_name.trim(),
            customer_email: request.customer_email.trim(),
            total_price: request.total_price,
            status: request.status,
            user_id: request.user_id.as_deref(),
            payment_reference: request.payment_reference.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CarRow {
    #[serde(deserialize_with = "de::string_or_number")]
    car_id: String,
    #[serde(default)]
    brand: String,
    #[serde(default)]
    model: String,
    price_per_day: Decimal,
}

impl From<CarRow> for BookingTarget {
    fn from(row: CarRow) -> Self {
        let name = format!("{} {}", row.brand.trim(), row.model.trim());
        BookingTarget::new(row.car_id, name.trim(), row.price_per_day)
    }
}

/// Reservation source, vehicle catalog and booking store in one
#[derive(Debug, Clone)]
pub struct RestBookingBackend {
    client: RestClient,
}

impl RestBookingBackend {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.build_client()?))
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    /// Bookings of one car, most recent start first
    pub async fn fetch_bookings(&self, vehicle_id: &VehicleId) -> ClientResult<Vec<Reservation>> {
        let rows: Vec<BookingRow> = self
            .client
            .get(
                BOOKINGS,
                &[
                    ("car_id", format!("eq.{vehicle_id}")),
                    ("order", "start_date.desc".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    pub async fn fetch_car(&self, vehicle_id: &VehicleId) -> ClientResult<Option<BookingTarget>> {
        let rows: Vec<CarRow> = self
            .client
            .get(
                CARS,
                &[
                    ("car_id", format!("eq.{vehicle_id}")),
                    ("select", "car_id,brand,model,price_per_day".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next().map(BookingTarget::from))
    }

    pub async fn insert_booking(
        &self,
        request: &CreateReservationRequest,
    ) -> ClientResult<Reservation> {
        let rows: Vec<BookingRow> = self
            .client
            .post(BOOKINGS, &[NewBookingRow::from(request)])
            .await?;
        rows.into_iter()
            .next()
            .map(Reservation::from)
            .ok_or_else(|| ClientError::InvalidResponse("insert returned no rows".into()))
    }
}

#[async_trait]
impl ReservationSource for RestBookingBackend {
    async fn reservations_for(&self, vehicle_id: &VehicleId) -> Result<Vec<Reservation>, SourceError> {
        let reservations = self.fetch_bookings(vehicle_id).await?;
        tracing::debug!(vehicle_id = %vehicle_id, count = reservations.len(), "Fetched bookings");
        Ok(reservations)
    }
}

#[async_trait]
impl VehicleCatalog for RestBookingBackend {
    async fn booking_target(&self, vehicle_id: &VehicleId) -> Result<BookingTarget, SourceError> {
        self.fetch_car(vehicle_id)
            .await?
            .ok_or_else(|| SourceError::VehicleNotFound(vehicle_id.to_string()))
    }
}

#[async_trait]
impl BookingStore for RestBookingBackend {
    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<Reservation, StoreError> {
        match self.insert_booking(request).await {
            Ok(reservation) => {
                tracing::info!(
                    vehicle_id = %reservation.vehicle_id,
                    booking_id = reservation.id.as_deref().unwrap_or("-"),
                    start = %reservation.start_date,
                    end = %reservation.end_date,
                    "Booking stored"
                );
                Ok(reservation)
            }
            Err(err) => {
                tracing::error!(vehicle_id = %request.vehicle_id, error = %err, "Failed to store booking");
                Err(err.into())
            }
        }
    }
}
