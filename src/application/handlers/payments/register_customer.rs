//! RegisterCustomerHandler - Command handler for creating vendor customers.

use std::sync::Arc;

use crate::ports::{Customer, NewCustomer, PaymentGateway};

/// Command to register a player as a vendor customer.
#[derive(Debug, Clone, Default)]
pub struct RegisterCustomerCommand {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Handler for customer registration.
///
/// Best-effort: `None` means the customer was not created, for any reason.
pub struct RegisterCustomerHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl RegisterCustomerHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: RegisterCustomerCommand) -> Option<Customer> {
        self.gateway
            .create_customer(NewCustomer {
                given_name: cmd.given_name,
                family_name: cmd.family_name,
                email: cmd.email,
                phone: cmd.phone,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::square::MockGateway;

    #[tokio::test]
    async fn creates_customer_from_command() {
        let gateway = Arc::new(MockGateway::new());
        let handler = RegisterCustomerHandler::new(gateway);

        let customer = handler
            .handle(RegisterCustomerCommand {
                given_name: Some("Alex".to_string()),
                email: Some("alex@example.com".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(customer.given_name.as_deref(), Some("Alex"));
        assert_eq!(customer.email.as_deref(), Some("alex@example.com"));
    }
}
