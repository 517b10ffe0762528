//! Payment gateway port for external payment processing.
//!
//! Defines the contract for payment vendor integrations (e.g. Square).
//! Implementations handle charge creation, refunds, customer management,
//! subscription creation, and webhook signature verification.
//!
//! # Design
//!
//! - **Gateway agnostic**: callers never see vendor wire shapes
//! - **Best-effort reads**: lookups collapse every failure to an empty
//!   result instead of raising
//! - **Caller-owned idempotency**: charge idempotency keys are supplied by
//!   the caller and forwarded unchanged; refund and subscription keys are
//!   generated fresh per call inside the adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::payments::{Payment, PaymentError};

/// Port for payment gateway integrations.
///
/// Every mutating operation performs exactly one vendor call; there is no
/// local retry loop. Retries are the caller's responsibility and must reuse
/// the same idempotency key only when exactly-once semantics are intended.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a charge from a tokenized payment source.
    ///
    /// The request's idempotency key is forwarded to the vendor unchanged.
    async fn create_payment(&self, request: CreatePaymentRequest)
        -> Result<Payment, PaymentError>;

    /// Look up a payment by vendor ID.
    ///
    /// Best-effort: returns `None` both when the vendor reports no such
    /// payment and when the query fails for any other reason.
    async fn get_payment(&self, payment_id: &str) -> Option<Payment>;

    /// Refund part or all of a payment.
    ///
    /// Generates a fresh idempotency key per call, so invoking this twice
    /// with identical arguments creates two refund attempts at the vendor.
    async fn refund_payment(
        &self,
        payment_id: &str,
        amount_minor: u64,
        reason: Option<&str>,
    ) -> RefundOutcome;

    /// Create a customer record at the vendor.
    ///
    /// Best-effort: returns `None` on any failure.
    async fn create_customer(&self, customer: NewCustomer) -> Option<Customer>;

    /// Look up a customer by vendor ID.
    ///
    /// Best-effort: returns `None` on any failure.
    async fn get_customer(&self, customer_id: &str) -> Option<Customer>;

    /// Subscribe a customer to a plan, returning the vendor subscription ID.
    ///
    /// Generates its own idempotency key. Best-effort: `None` on any failure.
    async fn create_subscription(&self, customer_id: &str, plan_id: &str) -> Option<String>;

    /// Verify a webhook signature against the configured signing key.
    ///
    /// Returns whether the signature matches the HMAC-SHA256 of the raw
    /// request body, base64-encoded. Integration points must reject any
    /// request for which this returns false.
    fn verify_webhook_signature(&self, body: &[u8], signature: &str) -> bool;
}

/// Request to create a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    /// Amount in minor units (pence). Must be greater than zero.
    pub amount_minor: u64,

    /// ISO 4217 currency code; `None` uses the configured default.
    pub currency: Option<String>,

    /// Opaque single-use token from the vendor's card widget.
    pub source_token: String,

    /// Caller-generated key identifying this logical charge attempt.
    /// Retries with the same key must not double-charge.
    pub idempotency_key: String,

    /// Free-text note attached to the charge.
    pub note: Option<String>,

    /// Caller's reference for reconciliation.
    pub reference_id: Option<String>,

    /// Buyer email for the vendor receipt.
    pub buyer_email: Option<String>,
}

/// Outcome of a refund attempt.
///
/// A value, not an error: the variants make success and failure payloads
/// mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundOutcome {
    /// The vendor accepted the refund.
    Refunded { refund_id: String },

    /// The refund was not created.
    Failed { error: String },
}

impl RefundOutcome {
    pub fn refunded(refund_id: impl Into<String>) -> Self {
        RefundOutcome::Refunded {
            refund_id: refund_id.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        RefundOutcome::Failed {
            error: error.into(),
        }
    }

    /// Whether the refund was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self, RefundOutcome::Refunded { .. })
    }

    /// The vendor refund ID, present iff the refund succeeded.
    pub fn refund_id(&self) -> Option<&str> {
        match self {
            RefundOutcome::Refunded { refund_id } => Some(refund_id),
            RefundOutcome::Failed { .. } => None,
        }
    }

    /// The failure message, present iff the refund failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            RefundOutcome::Refunded { .. } => None,
            RefundOutcome::Failed { error } => Some(error),
        }
    }
}

/// Data for creating a customer at the vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Customer in the payment system.
///
/// Created and updated only through gateway calls; there is no local
/// mutation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Vendor's customer ID.
    pub id: String,

    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,

    /// When the vendor created the customer.
    pub created_at: DateTime<Utc>,

    /// When the vendor last updated the customer.
    pub updated_at: DateTime<Utc>,
}
