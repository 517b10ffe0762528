//! RefundPaymentHandler - Command handler for refunding a payment.

use std::sync::Arc;

use crate::ports::{PaymentGateway, RefundOutcome};

/// Command to refund part or all of a payment.
#[derive(Debug, Clone)]
pub struct RefundPaymentCommand {
    /// Vendor payment ID to refund against.
    pub payment_id: String,

    /// Refund amount in minor units (pence).
    pub amount_minor: u64,

    /// Reason recorded with the refund; defaults at the gateway.
    pub reason: Option<String>,
}

/// Handler for refunds.
///
/// Returns an outcome value rather than an error; the gateway generates a
/// fresh idempotency key for every attempt, so repeating a command creates a
/// second refund rather than deduplicating.
pub struct RefundPaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl RefundPaymentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: RefundPaymentCommand) -> RefundOutcome {
        if cmd.amount_minor == 0 {
            return RefundOutcome::failed("Refund amount must be greater than zero");
        }

        self.gateway
            .refund_payment(&cmd.payment_id, cmd.amount_minor, cmd.reason.as_deref())
            .await
    }
}
