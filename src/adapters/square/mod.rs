//! Square payment gateway adapter.
//!
//! Implements the `PaymentGateway` port against the Square REST API:
//! - Charge creation from tokenized card sources
//! - Payment lookup
//! - Refunds
//! - Customer management
//! - Subscription creation
//! - Webhook signature verification
//!
//! # Security
//!
//! - Webhook signatures use HMAC-SHA256 with constant-time comparison
//! - The API access token and webhook key are handled via
//!   `secrecy::SecretString` and never logged

mod api_types;
mod gateway;
mod mock_gateway;
mod webhook;

pub use gateway::SquareGateway;
pub use mock_gateway::MockGateway;
pub use webhook::verify_webhook_signature;
