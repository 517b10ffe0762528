//! GetPaymentHandler - Query handler for payment lookup.

use std::sync::Arc;

use crate::domain::payments::Payment;
use crate::ports::PaymentGateway;

/// Query for a payment by vendor ID.
#[derive(Debug, Clone)]
pub struct GetPaymentQuery {
    pub payment_id: String,
}

/// Handler for payment lookup.
///
/// Best-effort: an empty result covers both "no such payment" and any
/// lookup failure, matching the gateway contract.
pub struct GetPaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl GetPaymentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, query: GetPaymentQuery) -> Option<Payment> {
        self.gateway.get_payment(&query.payment_id).await
    }
}
