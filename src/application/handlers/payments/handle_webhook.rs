//! HandleWebhookHandler - Command handler for vendor webhook deliveries.

use std::sync::Arc;

use crate::domain::payments::PaymentError;
use crate::ports::PaymentGateway;

/// Command carrying one raw webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,

    /// Signature header value.
    pub signature: String,
}

/// Handler for webhook deliveries.
///
/// Verifies the signature over the raw body and rejects anything that does
/// not match. Verification is the only validation performed here.
pub struct HandleWebhookHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl HandleWebhookHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: HandleWebhookCommand) -> Result<(), PaymentError> {
        if !self
            .gateway
            .verify_webhook_signature(&cmd.payload, &cmd.signature)
        {
            tracing::warn!("Rejected webhook with invalid signature");
            return Err(PaymentError::invalid_webhook_signature());
        }

        tracing::info!(bytes = cmd.payload.len(), "Webhook signature verified");
        Ok(())
    }
}
