//! Payment
//!
//! Payment methods offered on the payment step and the simulated gateway
//! used when no real one is wired in.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::card::CardDetails;
use super::traits::{PaymentError, PaymentGateway};
use crate::core::EngineConfig;

/// Payment method choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
    ApplePay,
    GooglePay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::Paypal,
        PaymentMethod::ApplePay,
        PaymentMethod::GooglePay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Card => "Card",
            Self::Paypal => "PayPal",
            Self::ApplePay => "Apple Pay",
            Self::GooglePay => "Google Pay",
        }
    }
}

/// What is sent to the gateway: card details only for card payments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentRequestMethod {
    Card(CardDetails),
    Paypal,
    ApplePay,
    GooglePay,
}

impl PaymentRequestMethod {
    pub fn method(&self) -> PaymentMethod {
        match self {
            Self::Card(_) => PaymentMethod::Card,
            Self::Paypal => PaymentMethod::Paypal,
            Self::ApplePay => PaymentMethod::ApplePay,
            Self::GooglePay => PaymentMethod::GooglePay,
        }
    }
}

/// Proof of a successful charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub amount: Decimal,
    pub method: PaymentMethod,
    /// Last four card digits, card payments only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    /// Unix millis
    pub paid_at: i64,
}

/// Scripted result of the simulated gateway
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SimulatedOutcome {
    #[default]
    Approve,
    Decline(String),
    /// Decline amounts strictly above the limit
    DeclineAbove(Decimal),
}

/// Gateway that waits a fixed delay, then answers per its outcome
#[derive(Debug, Clone, Default)]
pub struct SimulatedPaymentGateway {
    delay: Duration,
    outcome: SimulatedOutcome,
}

impl SimulatedPaymentGateway {
    pub fn new(delay: Duration, outcome: SimulatedOutcome) -> Self {
        Self { delay, outcome }
    }

    /// Approving gateway with the configured delay
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.payment_delay(), SimulatedOutcome::Approve)
    }

    /// Approving gateway with no delay
    pub fn instant() -> Self {
        Self::default()
    }

    pub fn with_outcome(mut self, outcome: SimulatedOutcome) -> Self {
        self.outcome = outcome;
        self
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn submit_payment(
        &self,
        amount: Decimal,
        method: &PaymentRequestMethod,
    ) -> Result<PaymentReceipt, PaymentError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.outcome {
            SimulatedOutcome::Decline(reason) => return Err(PaymentError::Declined(reason.clone())),
            SimulatedOutcome::DeclineAbove(limit) if amount > *limit => {
                return Err(PaymentError::Declined(format!("amount exceeds limit of {limit}")));
            }
            _ => {}
        }

        Ok(PaymentReceipt {
            reference: shared::util::prefixed_id("sim"),
            amount,
            method: method.method(),
            card_last4: match method {
                PaymentRequestMethod::Card(card) => Some(card.last4()),
                _ => None,
            },
            paid_at: shared::util::now_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_approve() {
        let gateway = SimulatedPaymentGateway::instant();
        let receipt = gateway
            .submit_payment(Decimal::from(240), &PaymentRequestMethod::Paypal)
            .await
            .unwrap();
        assert_eq!(receipt.amount, Decimal::from(240));
        assert_eq!(receipt.method, PaymentMethod::Paypal);
        assert_eq!(receipt.card_last4, None);
        assert!(receipt.reference.starts_with("sim_"));
    }

    #[tokio::test]
    async fn test_card_receipt_keeps_last_digits() {
        let card = CardDetails::from_input("Jane Doe", "4000 0566 5566 5556", "12/26", "123");
        let receipt = SimulatedPaymentGateway::instant()
            .submit_payment(Decimal::from(80), &PaymentRequestMethod::Card(card))
            .await
            .unwrap();
        assert_eq!(receipt.method, PaymentMethod::Card);
        assert_eq!(receipt.card_last4.as_deref(), Some("5556"));
    }

    #[tokio::test]
    async fn test_simulated_decline_above() {
        let gateway = SimulatedPaymentGateway::instant()
            .with_outcome(SimulatedOutcome::DeclineAbove(Decimal::from(100)));

        assert!(
            gateway
                .submit_payment(Decimal::from(100), &PaymentRequestMethod::ApplePay)
                .await
                .is_ok()
        );
        let err = gateway
            .submit_payment(Decimal::from(101), &PaymentRequestMethod::ApplePay)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Declined(_)));
    }

    #[tokio::test]
    async fn test_simulated_delay() {
        let gateway = SimulatedPaymentGateway::new(Duration::from_millis(30), SimulatedOutcome::Approve);
        let started = std::time::Instant::now();
        gateway
            .submit_payment(Decimal::ONE, &PaymentRequestMethod::GooglePay)
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_request_method_serialization() {
        let json = serde_json::to_value(PaymentRequestMethod::ApplePay).unwrap();
        assert_eq!(json, serde_json::json!({ "method": "apple_pay" }));
    }
}
