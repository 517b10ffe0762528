//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod payments;

pub use payments::{
    ChargeCardCommand, ChargeCardHandler, CreateSubscriptionCommand, CreateSubscriptionHandler,
    GetPaymentHandler, GetPaymentQuery, HandleWebhookCommand, HandleWebhookHandler,
    RefundPaymentCommand, RefundPaymentHandler, RegisterCustomerCommand, RegisterCustomerHandler,
};
