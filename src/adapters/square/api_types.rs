//! Square-specific wire types.
//!
//! These types mirror the Square REST API request and response bodies the
//! gateway adapter exchanges. Every response field that Square may omit is
//! an `Option`; normalization into domain types happens in the adapter, not
//! here.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Shared
// ════════════════════════════════════════════════════════════════════════════════

/// Monetary amount as Square represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: String,
}

/// One entry in Square's error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub category: Option<String>,
    pub code: Option<String>,
    pub detail: Option<String>,
}

/// Error envelope returned with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

impl ErrorEnvelope {
    /// The first reported error detail, if Square supplied one.
    pub fn first_detail(&self) -> Option<&str> {
        self.errors.first().and_then(|e| e.detail.as_deref())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Payments
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /v2/payments`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentBody {
    pub source_id: String,
    pub idempotency_key: String,
    pub amount_money: Money,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email_address: Option<String>,
}

/// Card section of a payment's card details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Card {
    pub card_brand: Option<String>,
    pub last_4: Option<String>,
    pub exp_month: Option<u32>,
    pub exp_year: Option<u32>,
}

/// Card details attached to a payment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardDetails {
    pub card: Option<Card>,
}

/// A payment object as Square returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SquarePayment {
    pub id: String,
    pub amount_money: Option<Money>,
    pub status: Option<String>,
    pub source_type: Option<String>,
    pub card_details: Option<CardDetails>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Response envelope for payment create/retrieve.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentEnvelope {
    pub payment: Option<SquarePayment>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Refunds
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /v2/refunds`.
#[derive(Debug, Clone, Serialize)]
pub struct RefundPaymentBody {
    pub idempotency_key: String,
    pub amount_money: Money,
    pub payment_id: String,
    pub reason: String,
}

/// A refund object as Square returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct SquareRefund {
    pub id: String,
    pub status: Option<String>,
}

/// Response envelope for refund creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefundEnvelope {
    pub refund: Option<SquareRefund>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Customers
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /v2/customers`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCustomerBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// A customer object as Square returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SquareCustomer {
    pub id: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Response envelope for customer create/retrieve.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerEnvelope {
    pub customer: Option<SquareCustomer>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Subscriptions
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /v2/subscriptions`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSubscriptionBody {
    pub idempotency_key: String,
    pub location_id: String,
    pub customer_id: String,
    pub plan_id: String,
}

/// A subscription object as Square returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct SquareSubscription {
    pub id: String,
}

/// Response envelope for subscription creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionEnvelope {
    pub subscription: Option<SquareSubscription>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payment_body_omits_absent_options() {
        let body = CreatePaymentBody {
            source_id: "tok_1".to_string(),
            idempotency_key: "key-1".to_string(),
            amount_money: Money {
                amount: 2500,
                currency: "GBP".to_string(),
            },
            note: None,
            reference_id: None,
            buyer_email_address: None,
        };

        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"source_id\":\"tok_1\""));
        assert!(json.contains("\"idempotency_key\":\"key-1\""));
        assert!(!json.contains("note"));
        assert!(!json.contains("reference_id"));
        assert!(!json.contains("buyer_email_address"));
    }

    #[test]
    fn payment_envelope_parses_minimal_payment() {
        let json = r#"{"payment":{"id":"pay_9"}}"#;
        let envelope: PaymentEnvelope = serde_json::from_str(json).unwrap();
        let payment = envelope.payment.unwrap();
        assert_eq!(payment.id, "pay_9");
        assert!(payment.amount_money.is_none());
        assert!(payment.card_details.is_none());
    }

    #[test]
    fn payment_envelope_parses_full_payment() {
        let json = r#"{
            "payment": {
                "id": "pay_9",
                "amount_money": {"amount": 2500, "currency": "GBP"},
                "status": "COMPLETED",
                "source_type": "CARD",
                "card_details": {
                    "card": {
                        "card_brand": "VISA",
                        "last_4": "1111",
                        "exp_month": 12,
                        "exp_year": 2028
                    }
                },
                "created_at": "2026-03-01T12:00:00Z",
                "updated_at": "2026-03-01T12:00:05Z"
            }
        }"#;
        let envelope: PaymentEnvelope = serde_json::from_str(json).unwrap();
        let payment = envelope.payment.unwrap();
        assert_eq!(payment.amount_money.unwrap().amount, 2500);
        assert_eq!(payment.status.as_deref(), Some("COMPLETED"));
        let card = payment.card_details.unwrap().card.unwrap();
        assert_eq!(card.card_brand.as_deref(), Some("VISA"));
        assert_eq!(card.last_4.as_deref(), Some("1111"));
    }

    #[test]
    fn error_envelope_surfaces_first_detail() {
        let json = r#"{
            "errors": [
                {"category": "PAYMENT_METHOD_ERROR", "code": "CARD_DECLINED", "detail": "Card declined"},
                {"category": "PAYMENT_METHOD_ERROR", "code": "OTHER", "detail": "Secondary"}
            ]
        }"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.first_detail(), Some("Card declined"));
    }

    #[test]
    fn error_envelope_tolerates_missing_fields() {
        let envelope: ErrorEnvelope = serde_json::from_str("{}").unwrap();
        assert_eq!(envelope.first_detail(), None);

        let envelope: ErrorEnvelope =
            serde_json::from_str(r#"{"errors":[{"category":"API_ERROR"}]}"#).unwrap();
        assert_eq!(envelope.first_detail(), None);
    }
}
