//! Normalized payment model.
//!
//! The stable shape callers program against, regardless of what the vendor
//! returns. Every field is populated with a defined fallback when the vendor
//! omits it; optional vendor sections map to `Option`, never to partially
//! filled structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Charge created/authorized but not yet captured.
    Created,

    /// Charge is in flight at the vendor.
    Pending,

    /// Charge settled successfully.
    Completed,

    /// Charge failed.
    Failed,

    /// Charge was canceled before completion.
    Canceled,

    /// Vendor reported a status we do not recognize (or none at all).
    Unknown,
}

impl PaymentStatus {
    /// Maps a vendor status string to the internal enum.
    ///
    /// Unrecognized or absent statuses become [`PaymentStatus::Unknown`]
    /// rather than an error.
    pub fn from_vendor(status: &str) -> Self {
        match status.to_ascii_uppercase().as_str() {
            "CREATED" | "APPROVED" => PaymentStatus::Created,
            "PENDING" => PaymentStatus::Pending,
            "COMPLETED" => PaymentStatus::Completed,
            "FAILED" => PaymentStatus::Failed,
            "CANCELED" => PaymentStatus::Canceled,
            _ => PaymentStatus::Unknown,
        }
    }

    /// Human-readable status label for receipts and admin views.
    pub fn text(&self) -> &'static str {
        match self {
            PaymentStatus::Created => "Created",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Canceled => "Cancelled",
            PaymentStatus::Unknown => "Unknown",
        }
    }

    /// Whether this status is settled and will not change again.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Completed | PaymentStatus::Failed | PaymentStatus::Canceled
        )
    }
}

/// Card details attached to a payment, when the source was a card.
///
/// Present only when the vendor supplied card details; individual missing
/// fields within the section fall back to `"UNKNOWN"`/empty/zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    /// Card brand, e.g. "VISA".
    pub brand: String,

    /// Last four digits of the card number.
    pub last4: String,

    /// Expiry month (1-12, 0 when unreported).
    pub exp_month: u32,

    /// Four-digit expiry year (0 when unreported).
    pub exp_year: u32,
}

/// A payment normalized from the vendor's response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Vendor-issued payment ID.
    pub id: String,

    /// Amount in minor units (pence).
    pub amount_minor: u64,

    /// ISO 4217 currency code.
    pub currency: String,

    /// Normalized lifecycle status.
    pub status: PaymentStatus,

    /// Vendor's source type, e.g. "CARD".
    pub source_type: String,

    /// Card summary when the source was a card.
    pub card: Option<CardSummary>,

    /// When the vendor created the payment.
    pub created_at: DateTime<Utc>,

    /// When the vendor last updated the payment.
    pub updated_at: DateTime<Utc>,
}
