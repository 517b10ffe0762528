//! CreateSubscriptionHandler - Command handler for monthly memberships.

use std::sync::Arc;

use crate::ports::PaymentGateway;

/// Command to subscribe an existing vendor customer to a plan.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub customer_id: String,
    pub plan_id: String,
}

/// Handler for subscription creation.
///
/// Best-effort: `None` means no subscription was created, for any reason.
/// The gateway generates its own idempotency key for the attempt.
pub struct CreateSubscriptionHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CreateSubscriptionHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: CreateSubscriptionCommand) -> Option<String> {
        self.gateway
            .create_subscription(&cmd.customer_id, &cmd.plan_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::square::MockGateway;

    #[tokio::test]
    async fn returns_subscription_id_on_success() {
        let gateway = Arc::new(MockGateway::new());
        gateway.set_subscription_id("sub_test123");
        let handler = CreateSubscriptionHandler::new(gateway);

        let result = handler
            .handle(CreateSubscriptionCommand {
                customer_id: "cus_test123".to_string(),
                plan_id: "plan_monthly".to_string(),
            })
            .await;

        assert_eq!(result.as_deref(), Some("sub_test123"));
    }

    #[tokio::test]
    async fn returns_none_on_failure() {
        let gateway = Arc::new(MockGateway::new());
        let handler = CreateSubscriptionHandler::new(gateway);

        let result = handler
            .handle(CreateSubscriptionCommand {
                customer_id: "cus_test123".to_string(),
                plan_id: "plan_monthly".to_string(),
            })
            .await;

        assert!(result.is_none());
    }
}
