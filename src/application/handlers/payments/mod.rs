//! Payment command and query handlers.

mod charge_card;
mod create_subscription;
mod get_payment;
mod handle_webhook;
mod refund_payment;
mod register_customer;

pub use charge_card::{ChargeCardCommand, ChargeCardHandler};
pub use create_subscription::{CreateSubscriptionCommand, CreateSubscriptionHandler};
pub use get_payment::{GetPaymentHandler, GetPaymentQuery};
pub use handle_webhook::{HandleWebhookCommand, HandleWebhookHandler};
pub use refund_payment::{RefundPaymentCommand, RefundPaymentHandler};
pub use register_customer::{RegisterCustomerCommand, RegisterCustomerHandler};
