//! Square gateway adapter.
//!
//! Implements the `PaymentGateway` port against the Square REST API.
//! Each mutating operation is exactly one HTTP exchange; responses are
//! normalized into domain types with defined fallbacks so callers never see
//! vendor omissions.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AppConfig::load()?;
//! config.validate()?;
//! let gateway = SquareGateway::new(config.payment);
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::config::PaymentConfig;
use crate::domain::payments::{CardSummary, Payment, PaymentError, PaymentStatus};
use crate::ports::{CreatePaymentRequest, Customer, NewCustomer, PaymentGateway, RefundOutcome};

use super::api_types::{
    CreateCustomerBody, CreatePaymentBody, CreateSubscriptionBody, CustomerEnvelope,
    ErrorEnvelope, Money, PaymentEnvelope, RefundEnvelope, RefundPaymentBody, SquareCustomer,
    SquarePayment, SubscriptionEnvelope,
};
use super::webhook;

/// Reason recorded on refunds when the caller does not supply one.
const DEFAULT_REFUND_REASON: &str = "Tournament cancellation";

/// Square payment gateway.
///
/// Holds no mutable state between calls; safe to share behind an `Arc`.
pub struct SquareGateway {
    config: PaymentConfig,
    base_url: String,
    http_client: reqwest::Client,
}

impl SquareGateway {
    /// Create a gateway from validated payment configuration.
    pub fn new(config: PaymentConfig) -> Self {
        let base_url = config.environment.api_base_url().to_string();
        Self {
            config,
            base_url,
            http_client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL (for testing against a local stub).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Build the Square charge body from an internal request.
    ///
    /// The idempotency key is carried over unchanged; the configured default
    /// currency fills in when the request does not name one.
    fn build_payment_body(&self, request: CreatePaymentRequest) -> CreatePaymentBody {
        CreatePaymentBody {
            source_id: request.source_token,
            idempotency_key: request.idempotency_key,
            amount_money: Money {
                amount: request.amount_minor as i64,
                currency: request
                    .currency
                    .unwrap_or_else(|| self.config.default_currency.clone()),
            },
            note: request.note,
            reference_id: request.reference_id,
            buyer_email_address: request.buyer_email,
        }
    }

    /// Normalize a Square payment into the domain shape.
    ///
    /// Absent optional fields map to defined fallbacks; an absent card
    /// section maps to no card summary at all.
    fn normalize_payment(&self, payment: SquarePayment) -> Payment {
        let (amount_minor, currency) = match payment.amount_money {
            Some(money) => (money.amount.max(0) as u64, money.currency),
            None => (0, self.config.default_currency.clone()),
        };

        let card = payment.card_details.and_then(|details| {
            details.card.map(|card| CardSummary {
                brand: card.card_brand.unwrap_or_else(|| "UNKNOWN".to_string()),
                last4: card.last_4.unwrap_or_default(),
                exp_month: card.exp_month.unwrap_or(0),
                exp_year: card.exp_year.unwrap_or(0),
            })
        });

        Payment {
            id: payment.id,
            amount_minor,
            currency,
            status: payment
                .status
                .as_deref()
                .map(PaymentStatus::from_vendor)
                .unwrap_or(PaymentStatus::Unknown),
            source_type: payment
                .source_type
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            card,
            created_at: parse_timestamp(payment.created_at),
            updated_at: parse_timestamp(payment.updated_at),
        }
    }

    fn normalize_customer(&self, customer: SquareCustomer) -> Customer {
        Customer {
            id: customer.id,
            given_name: customer.given_name,
            family_name: customer.family_name,
            email: customer.email_address,
            phone: customer.phone_number,
            created_at: parse_timestamp(customer.created_at),
            updated_at: parse_timestamp(customer.updated_at),
        }
    }

    /// Build the refund body for one attempt.
    ///
    /// Every call mints a fresh idempotency key; two refunds for the same
    /// payment and amount are distinct attempts at the vendor.
    fn build_refund_body(
        &self,
        payment_id: &str,
        amount_minor: u64,
        reason: Option<&str>,
    ) -> RefundPaymentBody {
        RefundPaymentBody {
            idempotency_key: Uuid::new_v4().to_string(),
            amount_money: Money {
                amount: amount_minor as i64,
                currency: self.config.default_currency.clone(),
            },
            payment_id: payment_id.to_string(),
            reason: reason.unwrap_or(DEFAULT_REFUND_REASON).to_string(),
        }
    }

    fn access_token(&self) -> &str {
        self.config.access_token.expose_secret()
    }

    /// Extract the first reported error detail from a non-2xx response.
    async fn error_detail(response: reqwest::Response) -> String {
        let envelope = response.json::<ErrorEnvelope>().await.unwrap_or_default();
        envelope
            .first_detail()
            .unwrap_or("Unknown error")
            .to_string()
    }
}

/// Parse a vendor RFC 3339 timestamp, falling back to now when absent or
/// malformed.
fn parse_timestamp(value: Option<String>) -> DateTime<Utc> {
    value
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

#[async_trait]
impl PaymentGateway for SquareGateway {
    async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<Payment, PaymentError> {
        let url = format!("{}/v2/payments", self.base_url);
        let body = self.build_payment_body(request);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.access_token())
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::unknown(e.to_string()))?;

        if !response.status().is_success() {
            let detail = Self::error_detail(response).await;
            tracing::error!(detail = %detail, "Square create_payment rejected");
            return Err(PaymentError::gateway_rejected(detail));
        }

        let envelope: PaymentEnvelope = response.json().await.map_err(|e| {
            PaymentError::unknown(format!("Failed to parse Square response: {}", e))
        })?;

        match envelope.payment {
            Some(payment) => {
                let payment = self.normalize_payment(payment);
                tracing::info!(
                    payment_id = %payment.id,
                    amount_minor = payment.amount_minor,
                    status = ?payment.status,
                    "Payment created"
                );
                Ok(payment)
            }
            None => Err(PaymentError::payment_failed()),
        }
    }

    async fn get_payment(&self, payment_id: &str) -> Option<Payment> {
        let url = format!("{}/v2/payments/{}", self.base_url, payment_id);

        let response = match self
            .http_client
            .get(&url)
            .bearer_auth(self.access_token())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(payment_id, error = %e, "Square get_payment request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                payment_id,
                status = %response.status(),
                "Square get_payment returned non-success"
            );
            return None;
        }

        let envelope: PaymentEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(payment_id, error = %e, "Failed to parse Square payment");
                return None;
            }
        };

        envelope.payment.map(|p| self.normalize_payment(p))
    }

    async fn refund_payment(
        &self,
        payment_id: &str,
        amount_minor: u64,
        reason: Option<&str>,
    ) -> RefundOutcome {
        let url = format!("{}/v2/refunds", self.base_url);
        let body = self.build_refund_body(payment_id, amount_minor, reason);

        let response = match self
            .http_client
            .post(&url)
            .bearer_auth(self.access_token())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(payment_id, error = %e, "Square refund request failed");
                return RefundOutcome::failed("Unknown error occurred");
            }
        };

        if !response.status().is_success() {
            let detail = Self::error_detail(response).await;
            tracing::warn!(payment_id, detail = %detail, "Square refund rejected");
            return RefundOutcome::failed(detail);
        }

        let envelope: RefundEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(payment_id, error = %e, "Failed to parse Square refund");
                return RefundOutcome::failed("Unknown error occurred");
            }
        };

        match envelope.refund {
            Some(refund) => RefundOutcome::refunded(refund.id),
            None => RefundOutcome::failed("Refund creation failed"),
        }
    }

    async fn create_customer(&self, customer: NewCustomer) -> Option<Customer> {
        let url = format!("{}/v2/customers", self.base_url);
        let body = CreateCustomerBody {
            given_name: customer.given_name,
            family_name: customer.family_name,
            email_address: customer.email,
            phone_number: customer.phone,
        };

        let response = match self
            .http_client
            .post(&url)
            .bearer_auth(self.access_token())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Square create_customer request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                "Square create_customer returned non-success"
            );
            return None;
        }

        let envelope: CustomerEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse Square customer");
                return None;
            }
        };

        envelope.customer.map(|c| self.normalize_customer(c))
    }

    async fn get_customer(&self, customer_id: &str) -> Option<Customer> {
        let url = format!("{}/v2/customers/{}", self.base_url, customer_id);

        let response = match self
            .http_client
            .get(&url)
            .bearer_auth(self.access_token())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(customer_id, error = %e, "Square get_customer request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                customer_id,
                status = %response.status(),
                "Square get_customer returned non-success"
            );
            return None;
        }

        let envelope: CustomerEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(customer_id, error = %e, "Failed to parse Square customer");
                return None;
            }
        };

        envelope.customer.map(|c| self.normalize_customer(c))
    }

    async fn create_subscription(&self, customer_id: &str, plan_id: &str) -> Option<String> {
        let url = format!("{}/v2/subscriptions", self.base_url);
        let body = CreateSubscriptionBody {
            idempotency_key: Uuid::new_v4().to_string(),
            location_id: self.config.location_id.clone(),
            customer_id: customer_id.to_string(),
            plan_id: plan_id.to_string(),
        };

        let response = match self
            .http_client
            .post(&url)
            .bearer_auth(self.access_token())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(customer_id, error = %e, "Square create_subscription request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                customer_id,
                status = %response.status(),
                "Square create_subscription returned non-success"
            );
            return None;
        }

        let envelope: SubscriptionEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(customer_id, error = %e, "Failed to parse Square subscription");
                return None;
            }
        };

        envelope.subscription.map(|s| s.id)
    }

    fn verify_webhook_signature(&self, body: &[u8], signature: &str) -> bool {
        webhook::verify_webhook_signature(
            self.config.webhook_signature_key.expose_secret(),
            body,
            signature,
        )
    }
}
