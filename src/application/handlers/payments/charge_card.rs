//! ChargeCardHandler - Command handler for charging a tokenized card.

use std::sync::Arc;

use crate::domain::payments::{Payment, PaymentError};
use crate::ports::{CreatePaymentRequest, PaymentGateway};

/// Command to charge a tokenized payment source.
#[derive(Debug, Clone)]
pub struct ChargeCardCommand {
    /// Single-use token from the card widget.
    pub source_id: String,

    /// Amount in minor units (pence). Must be greater than zero.
    pub amount_minor: u64,

    /// What the charge is for; recorded as the payment note.
    pub description: String,

    /// Caller-generated key identifying this logical charge attempt.
    pub idempotency_key: String,

    /// Buyer email for the vendor receipt.
    pub buyer_email: Option<String>,

    /// Caller's reference for reconciliation.
    pub reference_id: Option<String>,
}

/// Handler for charging a tokenized card.
///
/// Validates the command, then performs exactly one gateway call. The
/// idempotency key travels to the vendor unchanged; retrying with the same
/// key asks the vendor to collapse the attempts into one charge.
pub struct ChargeCardHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl ChargeCardHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: ChargeCardCommand) -> Result<Payment, PaymentError> {
        if cmd.amount_minor == 0 {
            return Err(PaymentError::validation(
                "amount",
                "must be greater than zero",
            ));
        }
        if cmd.source_id.is_empty() {
            return Err(PaymentError::validation("sourceId", "missing payment token"));
        }
        if cmd.idempotency_key.is_empty() {
            return Err(PaymentError::validation(
                "idempotencyKey",
                "missing idempotency key",
            ));
        }

        let request = CreatePaymentRequest {
            amount_minor: cmd.amount_minor,
            currency: None,
            source_token: cmd.source_id,
            idempotency_key: cmd.idempotency_key,
            note: Some(cmd.description).filter(|d| !d.is_empty()),
            reference_id: cmd.reference_id,
            buyer_email: cmd.buyer_email,
        };

        self.gateway.create_payment(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::square::MockGateway;

    fn command(key: &str) -> ChargeCardCommand {
        ChargeCardCommand {
            source_id: "tok_1".to_string(),
            amount_minor: 2500,
            description: "Tournament entry".to_string(),
            idempotency_key: key.to_string(),
            buyer_email: None,
            reference_id: None,
        }
    }

    #[tokio::test]
    async fn forwards_idempotency_key_unchanged() {
        let gateway = Arc::new(MockGateway::new());
        let handler = ChargeCardHandler::new(gateway.clone());

        handler.handle(command("key-abc-123")).await.unwrap();

        let requests = gateway.recorded_payment_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].idempotency_key, "key-abc-123");
        assert_eq!(requests[0].source_token, "tok_1");
    }

    #[tokio::test]
    async fn description_becomes_payment_note() {
        let gateway = Arc::new(MockGateway::new());
        let handler = ChargeCardHandler::new(gateway.clone());

        handler.handle(command("key-1")).await.unwrap();

        let requests = gateway.recorded_payment_requests();
        assert_eq!(requests[0].note.as_deref(), Some("Tournament entry"));
    }

    #[tokio::test]
    async fn empty_description_is_omitted() {
        let gateway = Arc::new(MockGateway::new());
        let handler = ChargeCardHandler::new(gateway.clone());

        handler
            .handle(ChargeCardCommand {
                description: String::new(),
                ..command("key-1")
            })
            .await
            .unwrap();

        assert_eq!(gateway.recorded_payment_requests()[0].note, None);
    }

    #[tokio::test]
    async fn rejects_zero_amount_without_calling_gateway() {
        let gateway = Arc::new(MockGateway::new());
        let handler = ChargeCardHandler::new(gateway.clone());

        let result = handler
            .handle(ChargeCardCommand {
                amount_minor: 0,
                ..command("key-1")
            })
            .await;

        assert!(matches!(
            result,
            Err(PaymentError::ValidationFailed { ref field, .. }) if field == "amount"
        ));
        assert!(gateway.recorded_payment_requests().is_empty());
    }

    #[tokio::test]
    async fn rejects_missing_source_token() {
        let gateway = Arc::new(MockGateway::new());
        let handler = ChargeCardHandler::new(gateway);

        let result = handler
            .handle(ChargeCardCommand {
                source_id: String::new(),
                ..command("key-1")
            })
            .await;

        assert!(matches!(result, Err(PaymentError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn rejects_missing_idempotency_key() {
        let gateway = Arc::new(MockGateway::new());
        let handler = ChargeCardHandler::new(gateway);

        let result = handler.handle(command("")).await;

        assert!(matches!(result, Err(PaymentError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn propagates_gateway_rejection() {
        let gateway = Arc::new(MockGateway::new());
        gateway.reject_next(PaymentError::gateway_rejected("Card declined"));
        let handler = ChargeCardHandler::new(gateway);

        let result = handler.handle(command("key-1")).await;

        assert!(matches!(
            result,
            Err(PaymentError::GatewayRejected { ref detail }) if detail == "Card declined"
        ));
    }
}
