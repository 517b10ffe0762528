//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Gateway Ports
//!
//! - `PaymentGateway` - Charge, refund, customer, and subscription operations
//!   against the payment vendor, plus webhook signature verification
//!
//! ## Checkout Ports
//!
//! - `PaymentSdk` / `CardWidget` - The hosted card-input widget surface the
//!   checkout form controller drives
//! - `ChargeApi` - The backend charge endpoint the form posts tokens to

mod checkout;
mod payment_gateway;

pub use checkout::{
    CardWidget, ChargeApi, ChargeApiError, ChargeRequest, ChargeResponse, PaymentSdk, SdkError,
    TokenizeResult,
};
pub use payment_gateway::{
    CreatePaymentRequest, Customer, NewCustomer, PaymentGateway, RefundOutcome,
};
