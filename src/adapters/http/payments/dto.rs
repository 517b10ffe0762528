//! HTTP DTOs (Data Transfer Objects) for payment endpoints.
//!
//! These types define the JSON request/response structure for the payments
//! API. They serve as the boundary between HTTP and the application layer.
//! Field names are camelCase to match what the checkout form sends.

use serde::{Deserialize, Serialize};

use crate::domain::payments::{format_amount, CardSummary, Payment};
use crate::ports::RefundOutcome;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to charge a tokenized card.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargePaymentRequest {
    /// Single-use token from the card widget.
    pub source_id: String,

    /// Amount in minor units (pence).
    pub amount: u64,

    /// What the charge is for, e.g. a tournament entry.
    pub description: String,

    /// Caller-generated key for this logical charge attempt.
    pub idempotency_key: String,

    /// Buyer email for the receipt.
    #[serde(default)]
    pub buyer_email: Option<String>,

    /// Caller's reference for reconciliation.
    #[serde(default)]
    pub reference_id: Option<String>,
}

/// Request to refund a payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    /// Refund amount in minor units (pence).
    pub amount: u64,

    /// Optional reason recorded with the refund.
    #[serde(default)]
    pub reason: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Detailed payment view for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Vendor payment ID.
    pub id: String,

    /// Amount in minor units (pence).
    pub amount: u64,

    /// Display amount, e.g. "£25.00".
    pub amount_formatted: String,

    /// ISO 4217 currency code.
    pub currency: String,

    /// Normalized status.
    pub status: String,

    /// Display label for the status.
    pub status_text: String,

    /// Vendor source type, e.g. "CARD".
    pub source_type: String,

    /// Card summary when the source was a card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardResponse>,

    /// When the vendor created the payment (ISO 8601).
    pub created_at: String,

    /// When the vendor last updated the payment (ISO 8601).
    pub updated_at: String,
}

/// Card summary in API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub brand: String,
    pub last4: String,
    pub exp_month: u32,
    pub exp_year: u32,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            amount: payment.amount_minor,
            amount_formatted: format_amount(payment.amount_minor),
            currency: payment.currency,
            status: payment.status.text().to_lowercase(),
            status_text: payment.status.text().to_string(),
            source_type: payment.source_type,
            card: payment.card.map(CardResponse::from),
            created_at: payment.created_at.to_rfc3339(),
            updated_at: payment.updated_at.to_rfc3339(),
        }
    }
}

impl From<CardSummary> for CardResponse {
    fn from(card: CardSummary) -> Self {
        Self {
            brand: card.brand,
            last4: card.last4,
            exp_month: card.exp_month,
            exp_year: card.exp_year,
        }
    }
}

/// Response for refund requests.
///
/// Always carries `success`, with `refundId` and `error` mutually exclusive.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RefundOutcome> for RefundResponse {
    fn from(outcome: RefundOutcome) -> Self {
        match outcome {
            RefundOutcome::Refunded { refund_id } => Self {
                success: true,
                refund_id: Some(refund_id),
                error: None,
            },
            RefundOutcome::Failed { error } => Self {
                success: false,
                refund_id: None,
                error: Some(error),
            },
        }
    }
}

/// Standard error body for non-contract endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub code: String,

    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
