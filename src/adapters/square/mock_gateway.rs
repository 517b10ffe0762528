//! Mock payment gateway for testing.
//!
//! Provides a configurable mock implementation of `PaymentGateway` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::domain::payments::{Payment, PaymentError, PaymentStatus};
use crate::ports::{CreatePaymentRequest, Customer, NewCustomer, PaymentGateway, RefundOutcome};

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockGateway::new();
///
/// // Inject an error
/// mock.reject_next(PaymentError::gateway_rejected("Card declined"));
///
/// // Use in tests
/// let result = mock.create_payment(request).await;
///
/// // Assert on what was forwarded
/// let requests = mock.recorded_payment_requests();
/// assert_eq!(requests[0].idempotency_key, "key-1");
/// ```
#[derive(Default)]
pub struct MockGateway {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Requests forwarded to `create_payment`, in order.
    payment_requests: Vec<CreatePaymentRequest>,

    /// Refund calls as (payment_id, amount_minor, reason), in order.
    refund_calls: Vec<(String, u64, Option<String>)>,

    /// Error to return from the next `create_payment` call.
    next_error: Option<PaymentError>,

    /// Refund outcome for the next `refund_payment` call.
    next_refund: Option<RefundOutcome>,

    /// Payment returned by lookups; `None` simulates not-found.
    stored_payment: Option<Payment>,

    /// Customer returned by customer operations.
    stored_customer: Option<Customer>,

    /// Subscription ID returned by `create_subscription`.
    next_subscription_id: Option<String>,

    /// Whether webhook verification passes.
    webhook_valid: bool,
}

impl MockGateway {
    /// Create a mock that succeeds with generated test objects.
    pub fn new() -> Self {
        let mock = Self::default();
        mock.inner.lock().unwrap().webhook_valid = true;
        mock
    }

    /// Create a mock that fails webhook verification.
    pub fn rejecting_webhooks() -> Self {
        Self::default()
    }

    /// Return `error` from the next `create_payment` call.
    pub fn reject_next(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Return `outcome` from the next `refund_payment` call.
    pub fn set_refund_outcome(&self, outcome: RefundOutcome) {
        self.inner.lock().unwrap().next_refund = Some(outcome);
    }

    /// Payment returned by `get_payment`.
    pub fn set_payment(&self, payment: Payment) {
        self.inner.lock().unwrap().stored_payment = Some(payment);
    }

    /// Customer returned by customer operations.
    pub fn set_customer(&self, customer: Customer) {
        self.inner.lock().unwrap().stored_customer = Some(customer);
    }

    /// Subscription ID returned by `create_subscription`.
    pub fn set_subscription_id(&self, id: impl Into<String>) {
        self.inner.lock().unwrap().next_subscription_id = Some(id.into());
    }

    /// All requests forwarded to `create_payment`, in order.
    pub fn recorded_payment_requests(&self) -> Vec<CreatePaymentRequest> {
        self.inner.lock().unwrap().payment_requests.clone()
    }

    /// All refund calls as (payment_id, amount_minor, reason), in order.
    pub fn recorded_refund_calls(&self) -> Vec<(String, u64, Option<String>)> {
        self.inner.lock().unwrap().refund_calls.clone()
    }

    /// Test payment echoing the request's amount and key-derived ID.
    fn payment_for(request: &CreatePaymentRequest) -> Payment {
        Payment {
            id: format!("pay_{}", request.source_token),
            amount_minor: request.amount_minor,
            currency: request.currency.clone().unwrap_or_else(|| "GBP".to_string()),
            status: PaymentStatus::Completed,
            source_type: "CARD".to_string(),
            card: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<Payment, PaymentError> {
        let mut state = self.inner.lock().unwrap();
        state.payment_requests.push(request.clone());

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(Self::payment_for(&request))
    }

    async fn get_payment(&self, payment_id: &str) -> Option<Payment> {
        let state = self.inner.lock().unwrap();
        state
            .stored_payment
            .clone()
            .filter(|p| p.id == payment_id)
    }

    async fn refund_payment(
        &self,
        payment_id: &str,
        amount_minor: u64,
        reason: Option<&str>,
    ) -> RefundOutcome {
        let mut state = self.inner.lock().unwrap();
        state.refund_calls.push((
            payment_id.to_string(),
            amount_minor,
            reason.map(str::to_string),
        ));

        state
            .next_refund
            .take()
            .unwrap_or_else(|| RefundOutcome::refunded("rf_test123"))
    }

    async fn create_customer(&self, customer: NewCustomer) -> Option<Customer> {
        let state = self.inner.lock().unwrap();
        Some(state.stored_customer.clone().unwrap_or(Customer {
            id: "cus_test123".to_string(),
            given_name: customer.given_name,
            family_name: customer.family_name,
            email: customer.email,
            phone: customer.phone,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }))
    }

    async fn get_customer(&self, customer_id: &str) -> Option<Customer> {
        let state = self.inner.lock().unwrap();
        state
            .stored_customer
            .clone()
            .filter(|c| c.id == customer_id)
    }

    async fn create_subscription(&self, _customer_id: &str, _plan_id: &str) -> Option<String> {
        self.inner.lock().unwrap().next_subscription_id.clone()
    }

    fn verify_webhook_signature(&self, _body: &[u8], _signature: &str) -> bool {
        self.inner.lock().unwrap().webhook_valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charge_request(key: &str) -> CreatePaymentRequest {
        CreatePaymentRequest {
            amount_minor: 2500,
            currency: None,
            source_token: "tok_1".to_string(),
            idempotency_key: key.to_string(),
            note: None,
            reference_id: None,
            buyer_email: None,
        }
    }

    #[tokio::test]
    async fn records_forwarded_payment_requests() {
        let mock = MockGateway::new();
        mock.create_payment(charge_request("key-1")).await.unwrap();
        mock.create_payment(charge_request("key-2")).await.unwrap();

        let requests = mock.recorded_payment_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].idempotency_key, "key-1");
        assert_eq!(requests[1].idempotency_key, "key-2");
    }

    #[tokio::test]
    async fn injected_error_is_returned_once() {
        let mock = MockGateway::new();
        mock.reject_next(PaymentError::gateway_rejected("Card declined"));

        let first = mock.create_payment(charge_request("key-1")).await;
        assert!(first.is_err());

        let second = mock.create_payment(charge_request("key-2")).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn get_payment_respects_stored_id() {
        let mock = MockGateway::new();
        let payment = MockGateway::payment_for(&charge_request("key-1"));
        mock.set_payment(payment.clone());

        assert_eq!(mock.get_payment(&payment.id).await, Some(payment));
        assert_eq!(mock.get_payment("pay_other").await, None);
    }

    #[tokio::test]
    async fn webhook_mode_controls_verification() {
        assert!(MockGateway::new().verify_webhook_signature(b"{}", "sig"));
        assert!(!MockGateway::rejecting_webhooks().verify_webhook_signature(b"{}", "sig"));
    }
}
